/// Parser and evaluator settings.
///
/// Declares the failure policy, the split policy for same-precedence chains
/// and the parenthesis nesting limit of the tree builder.
pub mod config;
/// The evaluator module resolves symbols and computes results.
///
/// The evaluator walks the expression tree bottom-up, applies each operator
/// and resolves each symbol leaf against a symbol table. It also owns the
/// scope stack and the scoped [`Context`](evaluator::context::Context).
///
/// # Responsibilities
/// - Evaluates trees under the permissive or strict policy.
/// - Manages nested scopes of constants and variables.
/// - Binds symbols to values ahead of evaluation for stored expressions.
pub mod evaluator;
/// The stateful expression holder.
///
/// Keeps the last accepted expression, its tree and a single-level constant
/// table between evaluations.
pub mod expression;
/// The lexer module classifies the accepted alphabet.
///
/// Locates the first character that cannot appear in an expression.
pub mod lexer;
/// The parser module builds expression trees from validated text.
///
/// # Responsibilities
/// - Splits spans at the lowest-precedence top-level operator.
/// - Strips grouping parentheses.
/// - Reads leaves as literals or symbol names.
pub mod parser;
/// Line-oriented scripts over a shared [`Context`](evaluator::context::Context).
///
/// Blank lines and `#` comments are skipped, `{` and `}` open and close a
/// scope, and `let`/`const` lines declare names from an expression.
pub mod script;
/// The validator module rejects malformed input before tree construction.
///
/// Strips insignificant whitespace and checks parenthesis balance and
/// character legality.
pub mod validator;
