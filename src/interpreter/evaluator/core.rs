use std::collections::HashMap;

use log::trace;

use crate::{
    ast::{Leaf, Term},
    error::RuntimeError,
    interpreter::config::SymbolPolicy,
};

/// Result type used by the evaluator and the scope stack.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A source of symbol values.
///
/// Implemented by [`ScopeStack`](super::scope::ScopeStack) for scoped lookup
/// and by a plain map for the single-level constant table of an
/// [`Expression`](crate::interpreter::expression::Expression).
pub trait SymbolTable {
    /// Returns the value bound to `name`, if any.
    fn lookup(&self, name: &str) -> Option<f32>;
}

impl SymbolTable for HashMap<String, f32> {
    fn lookup(&self, name: &str) -> Option<f32> {
        self.get(name).copied()
    }
}

/// Evaluates a tree under the given policy.
///
/// # Errors
/// `UnresolvedSymbol` under the strict policy when a leaf names an unbound
/// symbol. The permissive policy never fails.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use termcalc::{
///     ast::{Operator, Term},
///     interpreter::{config::SymbolPolicy, evaluator::core::eval_term},
/// };
///
/// let term = Term::operation(Operator::Mul, Term::symbol("x"), Term::literal(3.0));
/// let symbols = HashMap::from([("x".to_string(), 2.0_f32)]);
/// let empty = HashMap::<String, f32>::new();
///
/// assert_eq!(eval_term(&term, &symbols, SymbolPolicy::Strict), Ok(6.0));
/// assert!(eval_term(&term, &empty, SymbolPolicy::Strict).is_err());
/// assert_eq!(eval_term(&term, &empty, SymbolPolicy::Permissive), Ok(0.0));
/// ```
pub fn eval_term<S>(term: &Term, symbols: &S, policy: SymbolPolicy) -> EvalResult<f32>
    where S: SymbolTable + ?Sized
{
    match policy {
        SymbolPolicy::Permissive => Ok(eval_permissive(term, symbols)),
        SymbolPolicy::Strict => eval_strict(term, symbols),
    }
}

/// Evaluates a tree, reading unbound symbols as `0`.
///
/// Both children of every operation are evaluated; there is no short
/// circuiting.
pub fn eval_permissive<S>(term: &Term, symbols: &S) -> f32
    where S: SymbolTable + ?Sized
{
    match term {
        Term::Operation { op, left, right } => {
            let left = eval_permissive(left, symbols);
            let right = eval_permissive(right, symbols);
            op.apply(left, right)
        },
        Term::Value(Leaf::Literal(value)) => *value,
        Term::Value(Leaf::Symbol(name)) => {
            symbols.lookup(name).unwrap_or_else(|| {
                                    trace!("unresolved symbol '{name}' read as 0");
                                    0.0
                                })
        },
    }
}

/// Evaluates a tree, failing on the first unbound symbol.
///
/// # Errors
/// `UnresolvedSymbol` naming the first unbound symbol in post-order.
pub fn eval_strict<S>(term: &Term, symbols: &S) -> EvalResult<f32>
    where S: SymbolTable + ?Sized
{
    match term {
        Term::Operation { op, left, right } => {
            let left = eval_strict(left, symbols)?;
            let right = eval_strict(right, symbols)?;
            Ok(op.apply(left, right))
        },
        Term::Value(Leaf::Literal(value)) => Ok(*value),
        Term::Value(Leaf::Symbol(name)) => {
            symbols.lookup(name)
                   .ok_or_else(|| RuntimeError::UnresolvedSymbol { name: name.clone() })
        },
    }
}

/// Replaces every symbol leaf by the literal it currently resolves to.
///
/// After binding the tree no longer depends on the symbol table, so later
/// changes to the table do not affect it.
///
/// # Errors
/// `UnresolvedSymbol` under the strict policy. The permissive policy binds
/// unknown names to `0`.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use termcalc::{
///     ast::{Operator, Term},
///     interpreter::{config::SymbolPolicy, evaluator::core::bind_symbols},
/// };
///
/// let mut term = Term::operation(Operator::Add, Term::symbol("a"), Term::symbol("b"));
/// let symbols = HashMap::from([("a".to_string(), 1.5_f32)]);
///
/// bind_symbols(&mut term, &symbols, SymbolPolicy::Permissive).unwrap();
/// assert_eq!(term.to_string(), "(1.5 + 0)");
/// ```
pub fn bind_symbols<S>(term: &mut Term, symbols: &S, policy: SymbolPolicy) -> EvalResult<()>
    where S: SymbolTable + ?Sized
{
    match term {
        Term::Operation { left, right, .. } => {
            bind_symbols(left, symbols, policy)?;
            bind_symbols(right, symbols, policy)
        },
        Term::Value(leaf) => {
            if let Leaf::Symbol(name) = leaf {
                let value = match (symbols.lookup(name), policy) {
                    (Some(value), _) => value,
                    (None, SymbolPolicy::Permissive) => {
                        trace!("unresolved symbol '{name}' bound as 0");
                        0.0
                    },
                    (None, SymbolPolicy::Strict) => {
                        return Err(RuntimeError::UnresolvedSymbol { name: name.clone() });
                    },
                };
                *leaf = Leaf::Literal(value);
            }
            Ok(())
        },
    }
}
