/// The tree builder.
///
/// Turns a validated, whitespace-free span into an expression tree by
/// recursively splitting at the lowest-precedence top-level operator.
pub mod core;

/// Span scanning helpers.
///
/// Locates depth-zero operators and detects spans wrapped in a single pair of
/// parentheses.
pub mod split;
