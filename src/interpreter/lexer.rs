use logos::Logos;

/// Represents a run of legal characters in an expression.
///
/// The tree builder works on raw character spans, so these tokens are never
/// parsed into a tree. They describe the accepted alphabet: anything the lexer
/// cannot match is an illegal character.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// A run of decimal digits, such as `42`.
    #[regex(r"[0-9]+")]
    Digits,
    /// A name-like run such as `x`, `_tmp` or `r2`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Word,
    /// `.`
    #[token(".")]
    Dot,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
}

/// Finds the first character the lexer does not accept.
///
/// Returns the byte offset and the character, or `None` when every character
/// is legal.
///
/// # Example
/// ```
/// use termcalc::interpreter::lexer::first_illegal_char;
///
/// assert_eq!(first_illegal_char("2*(x_1+.5)"), None);
/// assert_eq!(first_illegal_char("2%3"), Some((1, '%')));
/// assert_eq!(first_illegal_char("1 + 2"), Some((1, ' ')));
/// ```
#[must_use]
pub fn first_illegal_char(source: &str) -> Option<(usize, char)> {
    let mut lexer = Token::lexer(source);
    while let Some(token) = lexer.next() {
        if token.is_err() {
            let position = lexer.span().start;
            return source[position..].chars().next().map(|ch| (position, ch));
        }
    }
    None
}
