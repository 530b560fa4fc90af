use crate::{
    ast::Term,
    error::{Error, ParseError},
    interpreter::{
        config::ParserConfig,
        evaluator::{
            core::{EvalResult, eval_term},
            scope::ScopeStack,
        },
        parser::core::compile,
    },
};

/// Stores the scoped evaluation state.
///
/// A `Context` owns one [`ScopeStack`] and the parser settings. Expressions
/// are validated, built and evaluated in one call and the tree is dropped
/// afterward, so symbols are always read with their values at evaluation
/// time.
///
/// ## Usage
///
/// ```
/// use termcalc::interpreter::evaluator::context::Context;
///
/// let mut context = Context::new();
/// context.set_constant("g", 9.5).unwrap();
/// context.set_variable("t", 2.0).unwrap();
///
/// assert_eq!(context.evaluate("g * t ^ 2 / 2").unwrap(), 19.0);
///
/// context.push_scope();
/// context.set_variable("t", 4.0).unwrap();
/// assert_eq!(context.evaluate("g * t ^ 2 / 2").unwrap(), 76.0);
///
/// context.pop_scope();
/// assert_eq!(context.evaluate("t").unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Parser and evaluator settings.
    pub config: ParserConfig,
    scopes:     ScopeStack,
}

impl Context {
    /// Creates a context with the default configuration and an empty root
    /// scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context with the given configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config,
               scopes: ScopeStack::new() }
    }

    /// Gives read access to the scope stack.
    #[must_use]
    pub const fn scopes(&self) -> &ScopeStack {
        &self.scopes
    }

    /// Validates and builds an expression without evaluating it.
    ///
    /// # Errors
    /// Any validation or tree building error.
    ///
    /// # Example
    /// ```
    /// use termcalc::interpreter::evaluator::context::Context;
    ///
    /// let context = Context::new();
    ///
    /// assert_eq!(context.parse("8-4-2").unwrap().unwrap().to_string(), "(8 - (4 - 2))");
    /// assert!(context.parse("").unwrap().is_none());
    /// ```
    pub fn parse(&self, text: &str) -> Result<Option<Term>, ParseError> {
        compile(text, &self.config).map(|(_, tree)| tree)
    }

    /// Validates, builds and evaluates an expression.
    ///
    /// An empty expression evaluates to `0`.
    ///
    /// # Errors
    /// - Any [`ParseError`] if the text is rejected.
    /// - `UnresolvedSymbol` under the strict policy.
    ///
    /// # Example
    /// ```
    /// use termcalc::interpreter::evaluator::context::Context;
    ///
    /// let context = Context::new();
    ///
    /// assert_eq!(context.evaluate("(2+3)*4").unwrap(), 20.0);
    /// assert!(context.evaluate("(2+3").is_err());
    /// assert_eq!(context.evaluate("unknown + 1").unwrap(), 1.0);
    /// ```
    pub fn evaluate(&self, text: &str) -> Result<f32, Error> {
        match self.parse(text)? {
            Some(tree) => Ok(eval_term(&tree, &self.scopes, self.config.symbol_policy)?),
            None => Ok(0.0),
        }
    }

    /// Evaluates an already built tree against the current scopes.
    ///
    /// # Errors
    /// `UnresolvedSymbol` under the strict policy.
    pub fn eval_tree(&self, tree: &Term) -> EvalResult<f32> {
        eval_term(tree, &self.scopes, self.config.symbol_policy)
    }

    /// Declares a constant in the innermost scope.
    ///
    /// # Errors
    /// `IllegalName` if the name breaks the identifier rules.
    pub fn set_constant(&mut self, name: &str, value: f32) -> EvalResult<()> {
        self.scopes.declare_constant(name, value)
    }

    /// Returns the value of `name` if it resolves to a constant.
    #[must_use]
    pub fn get_constant(&self, name: &str) -> Option<f32> {
        self.scopes.get_constant(name)
    }

    /// Declares or overwrites a variable in the innermost scope.
    ///
    /// # Errors
    /// - `IllegalName` if the name breaks the identifier rules.
    /// - `ConstantReassignment` if the innermost scope holds a constant of
    ///   that name.
    pub fn set_variable(&mut self, name: &str, value: f32) -> EvalResult<()> {
        self.scopes.declare_variable(name, value)
    }

    /// Returns the value of `name` if it resolves to a variable.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<f32> {
        self.scopes.get_variable(name)
    }

    /// Returns the value of `name` whatever its kind.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f32> {
        self.scopes.value(name)
    }

    /// Updates the nearest existing binding of a variable.
    ///
    /// # Errors
    /// - `UnknownSymbol` if no scope defines the name.
    /// - `ConstantReassignment` if the nearest binding is a constant.
    pub fn assign(&mut self, name: &str, value: f32) -> EvalResult<()> {
        self.scopes.assign(name, value)
    }

    /// Pushes a new innermost scope.
    pub fn push_scope(&mut self) {
        self.scopes.push_scope();
    }

    /// Pops the innermost scope. Returns `false` if only the root scope
    /// remains.
    pub fn pop_scope(&mut self) -> bool {
        self.scopes.pop_scope()
    }

    /// Empties every scope without changing the depth.
    pub fn clear_all_scopes(&mut self) {
        self.scopes.clear_all_scopes();
    }

    /// Pops every scope above the root.
    pub fn clear_local_scopes(&mut self) {
        self.scopes.clear_local_scopes();
    }
}
