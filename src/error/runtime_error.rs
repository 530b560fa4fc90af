use thiserror::Error;

/// Represents all errors raised while declaring, assigning or resolving
/// symbols.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A symbol was referenced but no scope defines it. Only raised in strict
    /// mode; the permissive policy reads it as `0`.
    #[error("Error: Unresolved symbol '{name}'.")]
    UnresolvedSymbol {
        /// The name of the symbol.
        name: String,
    },
    /// Tried to assign to a name that no scope defines.
    #[error("Error: Unknown symbol '{name}'.")]
    UnknownSymbol {
        /// The name of the symbol.
        name: String,
    },
    /// The name does not follow the identifier rules.
    #[error("Error: '{name}' is not a valid name. Names start with a letter or '_' followed by letters, digits or '_'.")]
    IllegalName {
        /// The rejected name.
        name: String,
    },
    /// Tried to overwrite a constant through a variable operation.
    #[error("Error: Cannot assign to constant '{name}'.")]
    ConstantReassignment {
        /// The name of the constant.
        name: String,
    },
    /// A script closed a scope while only the root scope was open.
    #[error("Error: Cannot close the root scope.")]
    RootScopeClosed,
}
