/// Tree evaluation.
///
/// Contains the symbol table abstraction, the post-order evaluator under both
/// failure policies and build-time symbol binding.
pub mod core;

/// The scope stack.
///
/// Holds constants and variables in nested environments, resolves names from
/// the innermost scope outward and enforces the rules for writing to
/// constants.
pub mod scope;

/// The scoped evaluation context.
///
/// Ties validation, tree building, scopes and evaluation together behind one
/// owned value.
pub mod context;
