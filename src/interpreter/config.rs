use clap::ValueEnum;

/// Default limit on parenthesis nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How unknown symbols, malformed leaves and missing operands are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymbolPolicy {
    /// Soft failure: anything that cannot be read as a value counts as `0`.
    #[default]
    Permissive,
    /// Every such case is reported as an error, both while building the tree
    /// and while evaluating it.
    Strict,
}

/// Which occurrence of an operator splits a span when the same precedence
/// tier appears more than once at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SplitPolicy {
    /// Split at the first occurrence. The right side is split again, so
    /// `8-4-2` groups as `8-(4-2)` and evaluates to `6`.
    #[default]
    Leftmost,
    /// Split at the last occurrence. Every chain groups to the left, so
    /// `8-4-2` is `(8-4)-2` and `2^3^2` is `(2^3)^2`.
    Rightmost,
}

/// Settings shared by the tree builder and the evaluator.
///
/// # Example
/// ```
/// use termcalc::interpreter::config::{ParserConfig, SplitPolicy, SymbolPolicy};
///
/// let config = ParserConfig::new().with_symbol_policy(SymbolPolicy::Strict)
///                                 .with_split_policy(SplitPolicy::Rightmost)
///                                 .with_max_depth(64);
///
/// assert_eq!(config.max_depth, 64);
/// assert_eq!(ParserConfig::default().symbol_policy, SymbolPolicy::Permissive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Soft or strict failure handling.
    pub symbol_policy: SymbolPolicy,
    /// Grouping of same-tier operator chains.
    pub split_policy:  SplitPolicy,
    /// Maximum parenthesis nesting. Operator chains are not limited.
    pub max_depth:     usize,
}

impl ParserConfig {
    /// Creates the default configuration: permissive, leftmost split and
    /// [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub const fn new() -> Self {
        Self { symbol_policy: SymbolPolicy::Permissive,
               split_policy:  SplitPolicy::Leftmost,
               max_depth:     DEFAULT_MAX_DEPTH, }
    }

    /// Replaces the symbol policy.
    #[must_use]
    pub const fn with_symbol_policy(mut self, policy: SymbolPolicy) -> Self {
        self.symbol_policy = policy;
        self
    }

    /// Replaces the split policy.
    #[must_use]
    pub const fn with_split_policy(mut self, policy: SplitPolicy) -> Self {
        self.split_policy = policy;
        self
    }

    /// Replaces the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns `true` when the strict policy is active.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        matches!(self.symbol_policy, SymbolPolicy::Strict)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::new()
    }
}
