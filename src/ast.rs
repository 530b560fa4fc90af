use std::fmt;

/// A binary arithmetic operator.
///
/// Only the five fixed operators exist. There is no unary form; a leading
/// `-` is treated like any other binary split with an empty left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

impl Operator {
    /// The order in which the tree builder searches for a split point,
    /// lowest precedence first.
    pub const PRECEDENCE: [Self; 5] = [Self::Add, Self::Sub, Self::Mul, Self::Div, Self::Pow];

    /// Returns the source character of this operator.
    ///
    /// # Example
    /// ```
    /// use termcalc::ast::Operator;
    ///
    /// assert_eq!(Operator::Pow.symbol(), '^');
    /// ```
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
        }
    }

    /// Maps a source character to its operator, if it is one.
    ///
    /// # Example
    /// ```
    /// use termcalc::ast::Operator;
    ///
    /// assert_eq!(Operator::from_char('/'), Some(Operator::Div));
    /// assert_eq!(Operator::from_char('%'), None);
    /// ```
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            '^' => Some(Self::Pow),
            _ => None,
        }
    }

    /// Applies the operator to two operands.
    ///
    /// Division follows IEEE 754, so dividing by zero yields an infinity or
    /// NaN instead of an error.
    ///
    /// # Example
    /// ```
    /// use termcalc::ast::Operator;
    ///
    /// assert_eq!(Operator::Pow.apply(2.0, 10.0), 1024.0);
    /// assert!(Operator::Div.apply(1.0, 0.0).is_infinite());
    /// ```
    #[must_use]
    pub fn apply(self, left: f32, right: f32) -> f32 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Pow => left.powf(right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The payload of a value node.
#[derive(Debug, Clone, PartialEq)]
pub enum Leaf {
    /// A parsed numeric literal such as `2` or `0.5`.
    Literal(f32),
    /// A name resolved against a symbol table when the tree is evaluated or
    /// bound.
    Symbol(String),
}

/// A node of the expression tree.
///
/// Operators sit at internal nodes and values at the leaves. Children are
/// owned, so dropping the root drops the whole tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A binary operation over two subtrees.
    Operation {
        /// The operator applied to the children.
        op:    Operator,
        /// Left operand.
        left:  Box<Term>,
        /// Right operand.
        right: Box<Term>,
    },
    /// A literal or symbol leaf.
    Value(Leaf),
}

impl Term {
    /// Creates a literal leaf.
    #[must_use]
    pub const fn literal(value: f32) -> Self {
        Self::Value(Leaf::Literal(value))
    }

    /// Creates a symbol leaf.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Value(Leaf::Symbol(name.into()))
    }

    /// Creates an operation node from two owned children.
    ///
    /// # Example
    /// ```
    /// use termcalc::ast::{Operator, Term};
    ///
    /// let term = Term::operation(Operator::Add, Term::literal(1.0), Term::symbol("x"));
    /// assert_eq!(term.to_string(), "(1 + x)");
    /// ```
    #[must_use]
    pub fn operation(op: Operator, left: Self, right: Self) -> Self {
        Self::Operation { op,
                          left: Box::new(left),
                          right: Box::new(right) }
    }

    /// Returns the height of the tree. A single leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Operation { left, right, .. } => 1 + left.depth().max(right.depth()),
            Self::Value(_) => 1,
        }
    }

    /// Collects every symbol name referenced by the tree, left to right.
    ///
    /// # Example
    /// ```
    /// use termcalc::ast::{Operator, Term};
    ///
    /// let term = Term::operation(Operator::Mul, Term::symbol("a"), Term::symbol("b"));
    /// assert_eq!(term.symbols(), vec!["a", "b"]);
    /// ```
    #[must_use]
    pub fn symbols(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_symbols(&mut names);
        names
    }

    fn collect_symbols<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Self::Operation { left, right, .. } => {
                left.collect_symbols(names);
                right.collect_symbols(names);
            },
            Self::Value(Leaf::Symbol(name)) => names.push(name),
            Self::Value(Leaf::Literal(_)) => {},
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operation { op, left, right } => write!(f, "({left} {op} {right})"),
            Self::Value(Leaf::Literal(value)) => write!(f, "{value}"),
            Self::Value(Leaf::Symbol(name)) => write!(f, "{name}"),
        }
    }
}
