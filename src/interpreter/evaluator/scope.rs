use std::{collections::HashMap, iter};

use log::debug;

use crate::{
    error::RuntimeError,
    interpreter::evaluator::core::{EvalResult, SymbolTable},
    util::chars::is_legal_name,
};

/// A named value binding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symbol {
    /// The bound value.
    pub value:   f32,
    /// `false` marks a constant.
    pub mutable: bool,
}

impl Symbol {
    /// Creates a constant binding.
    #[must_use]
    pub const fn constant(value: f32) -> Self {
        Self { value,
               mutable: false }
    }

    /// Creates a variable binding.
    #[must_use]
    pub const fn variable(value: f32) -> Self {
        Self { value,
               mutable: true }
    }

    /// Returns `true` for constants.
    #[must_use]
    pub const fn is_constant(&self) -> bool {
        !self.mutable
    }
}

type Scope = HashMap<String, Symbol>;

/// A stack of symbol environments.
///
/// The root scope lives as long as the stack and can be emptied but never
/// removed. Local scopes are pushed and popped on top of it; the most
/// recently pushed one is the innermost.
///
/// # Example
/// ```
/// use termcalc::interpreter::evaluator::scope::ScopeStack;
///
/// let mut scopes = ScopeStack::new();
/// scopes.declare_variable("x", 1.0).unwrap();
///
/// scopes.push_scope();
/// scopes.declare_variable("x", 2.0).unwrap();
/// assert_eq!(scopes.get_variable("x"), Some(2.0));
///
/// scopes.pop_scope();
/// assert_eq!(scopes.get_variable("x"), Some(1.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    root:   Scope,
    locals: Vec<Scope>,
}

impl ScopeStack {
    /// Creates a stack holding only an empty root scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of scopes, root included. Never less than 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.locals.len() + 1
    }

    /// Pushes a new empty innermost scope.
    ///
    /// Names declared from now on shadow same-named outer bindings without
    /// altering them.
    pub fn push_scope(&mut self) {
        self.locals.push(Scope::new());
        debug!("pushed scope, depth {}", self.depth());
    }

    /// Removes the innermost scope and drops its symbols.
    ///
    /// # Returns
    /// `false` if only the root scope remains, in which case nothing happens.
    ///
    /// # Example
    /// ```
    /// use termcalc::interpreter::evaluator::scope::ScopeStack;
    ///
    /// let mut scopes = ScopeStack::new();
    /// scopes.push_scope();
    ///
    /// assert!(scopes.pop_scope());
    /// assert!(!scopes.pop_scope());
    /// assert_eq!(scopes.depth(), 1);
    /// ```
    pub fn pop_scope(&mut self) -> bool {
        let popped = self.locals.pop().is_some();
        if popped {
            debug!("popped scope, depth {}", self.depth());
        } else {
            debug!("ignored pop of the root scope");
        }
        popped
    }

    /// Empties every scope, root included, keeping the stack depth.
    pub fn clear_all_scopes(&mut self) {
        self.root.clear();
        self.locals.iter_mut().for_each(Scope::clear);
        debug!("cleared all {} scopes", self.depth());
    }

    /// Pops every local scope, leaving the root scope and its symbols.
    pub fn clear_local_scopes(&mut self) {
        self.locals.clear();
        debug!("cleared local scopes");
    }

    /// Declares a constant in the innermost scope.
    ///
    /// Any binding of the same name in that scope is overwritten, including an
    /// earlier constant. Outer bindings are shadowed, not touched.
    ///
    /// # Errors
    /// `IllegalName` if the name breaks the identifier rules.
    ///
    /// # Example
    /// ```
    /// use termcalc::interpreter::evaluator::scope::ScopeStack;
    ///
    /// let mut scopes = ScopeStack::new();
    ///
    /// assert!(scopes.declare_constant("1x", 5.0).is_err());
    /// assert!(scopes.declare_constant("_x1", 5.0).is_ok());
    /// assert!(scopes.declare_constant("_x1", 6.0).is_ok());
    /// assert_eq!(scopes.get_constant("_x1"), Some(6.0));
    /// ```
    pub fn declare_constant(&mut self, name: &str, value: f32) -> EvalResult<()> {
        check_name(name)?;
        self.innermost_mut().insert(name.to_string(), Symbol::constant(value));
        Ok(())
    }

    /// Declares or overwrites a variable in the innermost scope.
    ///
    /// # Errors
    /// - `IllegalName` if the name breaks the identifier rules.
    /// - `ConstantReassignment` if the innermost scope already holds a
    ///   constant of that name. A constant in an outer scope may be shadowed.
    ///
    /// # Example
    /// ```
    /// use termcalc::interpreter::evaluator::scope::ScopeStack;
    ///
    /// let mut scopes = ScopeStack::new();
    /// scopes.declare_constant("pi", 3.14).unwrap();
    ///
    /// assert!(scopes.declare_variable("pi", 3.0).is_err());
    ///
    /// scopes.push_scope();
    /// assert!(scopes.declare_variable("pi", 3.0).is_ok());
    /// assert_eq!(scopes.get_variable("pi"), Some(3.0));
    /// ```
    pub fn declare_variable(&mut self, name: &str, value: f32) -> EvalResult<()> {
        check_name(name)?;
        let scope = self.innermost_mut();
        if scope.get(name).is_some_and(Symbol::is_constant) {
            debug!("rejected variable '{name}': a constant of that name exists in this scope");
            return Err(RuntimeError::ConstantReassignment { name: name.to_string() });
        }
        scope.insert(name.to_string(), Symbol::variable(value));
        Ok(())
    }

    /// Assigns a new value to the nearest binding of a name.
    ///
    /// Unlike [`declare_variable`](Self::declare_variable) this never creates
    /// a binding; it updates the one found by [`resolve`](Self::resolve).
    ///
    /// # Errors
    /// - `UnknownSymbol` if no scope defines the name.
    /// - `ConstantReassignment` if the nearest binding is a constant.
    ///
    /// # Example
    /// ```
    /// use termcalc::interpreter::evaluator::scope::ScopeStack;
    ///
    /// let mut scopes = ScopeStack::new();
    /// scopes.declare_variable("x", 1.0).unwrap();
    /// scopes.push_scope();
    ///
    /// scopes.assign("x", 5.0).unwrap();
    /// scopes.pop_scope();
    ///
    /// assert_eq!(scopes.get_variable("x"), Some(5.0));
    /// assert!(scopes.assign("y", 1.0).is_err());
    /// ```
    pub fn assign(&mut self, name: &str, value: f32) -> EvalResult<()> {
        match self.resolve_mut(name) {
            None => Err(RuntimeError::UnknownSymbol { name: name.to_string() }),
            Some(symbol) if symbol.is_constant() => {
                Err(RuntimeError::ConstantReassignment { name: name.to_string() })
            },
            Some(symbol) => {
                symbol.value = value;
                Ok(())
            },
        }
    }

    /// Resolves a name from the innermost scope outward.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.locals
            .iter()
            .rev()
            .chain(iter::once(&self.root))
            .find_map(|scope| scope.get(name))
    }

    /// Resolves a name from the innermost scope outward for modification.
    pub fn resolve_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.locals
            .iter_mut()
            .rev()
            .chain(iter::once(&mut self.root))
            .find_map(|scope| scope.get_mut(name))
    }

    /// Returns the value of the nearest binding, constant or variable.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f32> {
        self.resolve(name).map(|symbol| symbol.value)
    }

    /// Returns the value if the nearest binding is a constant.
    #[must_use]
    pub fn get_constant(&self, name: &str) -> Option<f32> {
        self.resolve(name)
            .filter(|symbol| symbol.is_constant())
            .map(|symbol| symbol.value)
    }

    /// Returns the value if the nearest binding is a variable.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<f32> {
        self.resolve(name)
            .filter(|symbol| symbol.mutable)
            .map(|symbol| symbol.value)
    }

    fn innermost_mut(&mut self) -> &mut Scope {
        self.locals.last_mut().unwrap_or(&mut self.root)
    }
}

impl SymbolTable for ScopeStack {
    fn lookup(&self, name: &str) -> Option<f32> {
        self.value(name)
    }
}

/// Rejects names that break the identifier rules.
pub(crate) fn check_name(name: &str) -> EvalResult<()> {
    if is_legal_name(name) {
        Ok(())
    } else {
        debug!("rejected declaration of illegal name '{name}'");
        Err(RuntimeError::IllegalName { name: name.to_string() })
    }
}
