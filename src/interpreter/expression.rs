use std::collections::HashMap;

use log::debug;

use crate::{
    ast::Term,
    error::{Error, RuntimeError},
    interpreter::{
        config::ParserConfig,
        evaluator::{
            core::{bind_symbols, eval_permissive},
            scope::check_name,
        },
        parser::core::TreeBuilder,
        validator::validate,
    },
};

/// A stored expression with its own constant table.
///
/// Unlike [`Context`](crate::interpreter::evaluator::context::Context), an
/// `Expression` keeps its tree between evaluations. Constants are bound when
/// the expression is set, so changing a constant afterward has no effect
/// until the expression is set again.
///
/// # Example
/// ```
/// use termcalc::interpreter::expression::Expression;
///
/// let mut expression = Expression::new();
/// expression.set_constant("r", 2.0).unwrap();
/// expression.set_expression("3 * r ^ 2").unwrap();
///
/// assert_eq!(expression.expression(), "3*r^2");
/// assert_eq!(expression.evaluate(), 12.0);
///
/// expression.set_constant("r", 3.0).unwrap();
/// assert_eq!(expression.evaluate(), 12.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Expression {
    /// Parser settings used by [`set_expression`](Self::set_expression).
    pub config: ParserConfig,
    source:     String,
    root:       Option<Term>,
    constants:  HashMap<String, f32>,
}

impl Expression {
    /// Creates an empty expression with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty expression with the given configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config,
               ..Self::default() }
    }

    /// Replaces the stored expression and rebuilds its tree.
    ///
    /// The previous tree is dropped whatever the outcome. When the new text
    /// is rejected the stored text is cleared as well and evaluation yields
    /// `0` until a valid expression is set.
    ///
    /// # Errors
    /// - Any [`ParseError`](crate::error::ParseError) from validation or tree
    ///   building.
    /// - `UnresolvedSymbol` under the strict policy when a name has no
    ///   constant.
    ///
    /// # Example
    /// ```
    /// use termcalc::interpreter::expression::Expression;
    ///
    /// let mut expression = Expression::new();
    /// expression.set_expression("1+1").unwrap();
    ///
    /// assert!(expression.set_expression("(1+1").is_err());
    /// assert_eq!(expression.expression(), "");
    /// assert_eq!(expression.evaluate(), 0.0);
    /// ```
    pub fn set_expression(&mut self, text: &str) -> Result<(), Error> {
        self.root = None;

        match self.build(text) {
            Ok((source, root)) => {
                self.source = source;
                self.root = root;
                Ok(())
            },
            Err(error) => {
                debug!("expression cleared: {error}");
                self.source.clear();
                Err(error)
            },
        }
    }

    fn build(&self, text: &str) -> Result<(String, Option<Term>), Error> {
        let source = validate(text)?;
        let mut root = TreeBuilder::new(&self.config).build(&source)?;
        if let Some(tree) = root.as_mut() {
            bind_symbols(tree, &self.constants, self.config.symbol_policy)?;
        }
        Ok((source, root))
    }

    /// Returns the sanitized text of the stored expression, or `""` if none
    /// is set.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.source
    }

    /// Returns the stored tree, if any.
    #[must_use]
    pub const fn tree(&self) -> Option<&Term> {
        self.root.as_ref()
    }

    /// Returns `true` if a tree is stored.
    #[must_use]
    pub const fn has_tree(&self) -> bool {
        self.root.is_some()
    }

    /// Evaluates the stored tree. Without a tree the result is `0`.
    ///
    /// Repeated calls return the same value, since the tree holds no
    /// unresolved symbols.
    #[must_use]
    pub fn evaluate(&self) -> f32 {
        self.root
            .as_ref()
            .map_or(0.0, |tree| eval_permissive(tree, &self.constants))
    }

    /// Defines or overwrites a constant.
    ///
    /// # Errors
    /// `IllegalName` if the name breaks the identifier rules.
    ///
    /// # Example
    /// ```
    /// use termcalc::interpreter::expression::Expression;
    ///
    /// let mut expression = Expression::new();
    ///
    /// assert!(expression.set_constant("1x", 5.0).is_err());
    /// assert!(expression.set_constant("_x1", 5.0).is_ok());
    /// assert_eq!(expression.get_constant("_x1"), Some(5.0));
    /// assert_eq!(expression.get_constant("missing"), None);
    /// ```
    pub fn set_constant(&mut self, name: &str, value: f32) -> Result<(), RuntimeError> {
        check_name(name)?;
        self.constants.insert(name.to_string(), value);
        Ok(())
    }

    /// Returns the value of a constant.
    #[must_use]
    pub fn get_constant(&self, name: &str) -> Option<f32> {
        self.constants.get(name).copied()
    }
}
