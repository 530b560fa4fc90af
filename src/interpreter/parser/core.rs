use log::trace;

use crate::{
    ast::{Operator, Term},
    error::ParseError,
    interpreter::{
        config::{ParserConfig, SplitPolicy},
        parser::split::{encloses_whole, find_split},
        validator::validate,
    },
    util::chars::{is_legal_name, parse_literal},
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Builds expression trees from validated spans.
///
/// The builder never tokenizes. Each span is split at its lowest-precedence
/// operator outside of parentheses, and spans without such an operator are
/// either unwrapped (when a single pair of parentheses surrounds them) or read
/// as a leaf.
///
/// Chains are walked in a loop: the side of a split that keeps the chain
/// going is scanned again without recursing, and only the other side, which
/// holds strictly higher precedence operators, is built recursively. Recursion
/// depth therefore follows parenthesis nesting, which is what
/// [`ParserConfig::max_depth`] bounds.
///
/// # Example
/// ```
/// use termcalc::interpreter::{config::ParserConfig, parser::core::TreeBuilder};
///
/// let config = ParserConfig::default();
/// let tree = TreeBuilder::new(&config).build("2+3*4").unwrap().unwrap();
///
/// assert_eq!(tree.to_string(), "(2 + (3 * 4))");
/// ```
pub struct TreeBuilder<'c> {
    config: &'c ParserConfig,
}

/// One split of a chain: the operator, its position and the operand that
/// does not continue the chain.
struct Link {
    op:       Operator,
    position: usize,
    operand:  Term,
}

impl<'c> TreeBuilder<'c> {
    /// Creates a builder using the given configuration.
    #[must_use]
    pub const fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    /// Builds a tree from a whitespace-free span.
    ///
    /// The span is expected to have passed validation. An empty span yields
    /// `Ok(None)`, which evaluates to `0`.
    ///
    /// # Errors
    /// - `NestingTooDeep` when parentheses nest deeper than the limit.
    /// - `MissingOperand`, `EmptyGroup` and `MalformedTerm` under the strict
    ///   policy. The permissive policy reads these as zero instead.
    pub fn build(&self, span: &str) -> ParseResult<Option<Term>> {
        self.build_span(span, 0, 0)
    }

    /// Builds a span at the given parenthesis depth.
    fn build_span(&self, span: &str, offset: usize, depth: usize) -> ParseResult<Option<Term>> {
        let policy = self.config.split_policy;
        let mut links = Vec::new();
        let mut rest = span;
        let mut rest_offset = offset;

        while let Some((index, op)) = find_split(rest, policy) {
            let position = rest_offset + index;
            trace!("splitting '{rest}' at '{op}' (offset {position})");

            let operand = match policy {
                SplitPolicy::Leftmost => {
                    let left =
                        self.build_operand(&rest[..index], rest_offset, depth, op, position)?;
                    rest = &rest[index + 1..];
                    rest_offset = position + 1;
                    left
                },
                SplitPolicy::Rightmost => {
                    let right =
                        self.build_operand(&rest[index + 1..], position + 1, depth, op, position)?;
                    rest = &rest[..index];
                    right
                },
            };
            links.push(Link { op,
                              position,
                              operand });
        }

        let tail = self.build_group(rest, rest_offset, depth)?;
        let Some(last) = links.last() else {
            return Ok(tail);
        };
        let mut tree = self.require_operand(tail, last.op, last.position)?;

        for Link { op, operand, .. } in links.into_iter().rev() {
            tree = match policy {
                SplitPolicy::Leftmost => Term::operation(op, operand, tree),
                SplitPolicy::Rightmost => Term::operation(op, tree, operand),
            };
        }

        Ok(Some(tree))
    }

    /// Builds a span without depth-zero operators: a parenthesized group, a
    /// leaf or nothing.
    fn build_group(&self, span: &str, offset: usize, depth: usize) -> ParseResult<Option<Term>> {
        if span.is_empty() {
            return Ok(None);
        }

        if encloses_whole(span) {
            if depth >= self.config.max_depth {
                return Err(ParseError::NestingTooDeep { limit: self.config.max_depth });
            }
            let inner = &span[1..span.len() - 1];
            if inner.is_empty() && self.config.is_strict() {
                return Err(ParseError::EmptyGroup { position: offset });
            }
            return self.build_span(inner, offset + 1, depth + 1);
        }

        self.build_leaf(span, offset).map(Some)
    }

    /// Builds the side of an operation that does not continue the chain.
    fn build_operand(&self,
                     span: &str,
                     offset: usize,
                     depth: usize,
                     op: Operator,
                     position: usize)
                     -> ParseResult<Term> {
        let term = self.build_span(span, offset, depth)?;
        self.require_operand(term, op, position)
    }

    /// Operation nodes always own two children, so an empty side becomes a
    /// `0` literal under the permissive policy.
    fn require_operand(&self,
                       term: Option<Term>,
                       op: Operator,
                       position: usize)
                       -> ParseResult<Term> {
        match term {
            Some(term) => Ok(term),
            None if self.config.is_strict() => {
                Err(ParseError::MissingOperand { operator: op.symbol(),
                                                 position })
            },
            None => {
                trace!("empty operand of '{op}' at {position} read as 0");
                Ok(Term::literal(0.0))
            },
        }
    }

    fn build_leaf(&self, span: &str, offset: usize) -> ParseResult<Term> {
        if let Some(value) = parse_literal(span) {
            return Ok(Term::literal(value));
        }

        if self.config.is_strict() && !is_legal_name(span) {
            return Err(ParseError::MalformedTerm { term:     span.to_string(),
                                                   position: offset, });
        }

        Ok(Term::symbol(span))
    }
}

/// Validates a raw expression and builds its tree.
///
/// # Returns
/// The sanitized text together with the tree, which is `None` for an empty
/// expression.
///
/// # Errors
/// Any validation or tree building error.
///
/// # Example
/// ```
/// use termcalc::interpreter::{config::ParserConfig, parser::core::compile};
///
/// let (text, tree) = compile(" (2 + 3) * 4 ", &ParserConfig::default()).unwrap();
///
/// assert_eq!(text, "(2+3)*4");
/// assert_eq!(tree.unwrap().to_string(), "((2 + 3) * 4)");
/// assert!(compile("(2 + 3", &ParserConfig::default()).is_err());
/// ```
pub fn compile(text: &str, config: &ParserConfig) -> ParseResult<(String, Option<Term>)> {
    let sanitized = validate(text)?;
    let tree = TreeBuilder::new(config).build(&sanitized)?;
    Ok((sanitized, tree))
}
