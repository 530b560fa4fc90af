use thiserror::Error;

/// Represents all structural errors detected before or during tree
/// construction.
///
/// Positions are byte offsets into the sanitized expression, that is after
/// whitespace has been removed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Parentheses do not pair up.
    #[error("Error in expression: Unbalanced parentheses.")]
    UnbalancedBraces,
    /// A character outside the accepted alphabet was found.
    #[error("Error at position {position}: Illegal character '{character}'.")]
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// Where it was found.
        position:  usize,
    },
    /// Parentheses nest deeper than the configured limit.
    #[error("Error in expression: Nesting is deeper than the limit of {limit}.")]
    NestingTooDeep {
        /// The configured maximum depth.
        limit: usize,
    },
    /// An operator has nothing on one of its sides. Only raised in strict
    /// mode.
    #[error("Error at position {position}: Operator '{operator}' is missing an operand.")]
    MissingOperand {
        /// The operator character.
        operator: char,
        /// Position of the operator.
        position: usize,
    },
    /// A group `()` contains nothing. Only raised in strict mode.
    #[error("Error at position {position}: Empty parentheses.")]
    EmptyGroup {
        /// Position of the opening parenthesis.
        position: usize,
    },
    /// A leaf is neither a number nor a legal name. Only raised in strict
    /// mode.
    #[error("Error at position {position}: '{term}' is neither a number nor a valid name.")]
    MalformedTerm {
        /// The leaf text.
        term:     String,
        /// Where the leaf starts.
        position: usize,
    },
}
