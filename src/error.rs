use thiserror::Error;

/// Structural errors.
///
/// Unbalanced parentheses, illegal characters and malformed terms. These are
/// detected before any value is computed.
pub mod parse_error;
/// Symbol errors.
///
/// Contains the errors raised by the scope stack and the evaluator: illegal
/// names, writes to constants and unresolved symbols.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Any error produced while compiling or evaluating an expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The expression was rejected before evaluation.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A symbol could not be declared, assigned or resolved.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
