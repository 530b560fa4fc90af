//! # termcalc
//!
//! termcalc is an arithmetic expression compiler and evaluator written in
//! Rust. It turns flat text made of numbers, names, parentheses and the
//! operators `+ - * / ^` into a binary expression tree and evaluates it to a
//! single-precision result, resolving names against nested scopes of
//! constants and variables.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the expression tree.
///
/// This module declares the `Term` enum, its `Leaf` payloads and the
/// `Operator` set. Trees are built by the parser and walked by the evaluator.
///
/// # Responsibilities
/// - Represents operations and values as a tagged sum type.
/// - Applies operators to operands.
/// - Renders trees in fully parenthesized form.
pub mod ast;
/// Provides unified error types for validation, tree building and
/// evaluation.
///
/// # Responsibilities
/// - Defines structural errors reported before evaluation.
/// - Defines symbol errors raised by scopes and the strict evaluator.
/// - Combines both into one error type for the public entry points.
pub mod error;
/// Orchestrates validation, tree building and evaluation.
///
/// This module ties together the validator, the tree builder, the scope
/// stack and the evaluator, and exposes the scoped `Context` and the
/// stateful `Expression`.
pub mod interpreter;
/// General character helpers shared across the interpreter.
pub mod util;

pub use error::Error;
pub use interpreter::{
    config::{ParserConfig, SplitPolicy, SymbolPolicy},
    evaluator::context::Context,
    expression::Expression,
};

/// Evaluates one expression with an empty context.
///
/// Unknown names read as `0` and same-precedence chains split at their first
/// operator.
///
/// # Errors
/// Returns an error if the expression is rejected by validation.
///
/// # Examples
/// ```
/// use termcalc::evaluate;
///
/// assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
/// assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
/// assert_eq!(evaluate("8-4-2").unwrap(), 6.0);
///
/// assert!(evaluate("(1+2").is_err());
/// ```
pub fn evaluate(text: &str) -> Result<f32, Error> {
    Context::new().evaluate(text)
}
