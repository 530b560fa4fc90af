use log::debug;

use crate::{
    error::ParseError,
    interpreter::lexer::first_illegal_char,
    util::chars::is_insignificant,
};

/// Removes insignificant whitespace.
///
/// Spaces, tabs, newlines and carriage returns are dropped and the remaining
/// characters keep their order. Nothing else is normalized.
///
/// # Example
/// ```
/// use termcalc::interpreter::validator::sanitize;
///
/// assert_eq!(sanitize(" 2 *\t(x +\r\n1) "), "2*(x+1)");
/// ```
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|&ch| !is_insignificant(ch)).collect()
}

/// Checks that every `(` is matched by a later `)`.
///
/// Only parentheses take part. The scan fails as soon as a `)` appears with
/// no open group.
///
/// # Example
/// ```
/// use termcalc::interpreter::validator::is_brace_balanced;
///
/// assert!(is_brace_balanced("((1+2))"));
/// assert!(!is_brace_balanced("(1+2"));
/// assert!(!is_brace_balanced("1+2)"));
/// assert!(!is_brace_balanced(")("));
/// ```
#[must_use]
pub fn is_brace_balanced(text: &str) -> bool {
    let mut open = 0usize;
    for byte in text.bytes() {
        match byte {
            b'(' => open += 1,
            b')' => {
                if open == 0 {
                    return false;
                }
                open -= 1;
            },
            _ => {},
        }
    }
    open == 0
}

/// Checks that the text only uses digits, ASCII letters, `_`, `.`, the five
/// operators and parentheses.
///
/// # Example
/// ```
/// use termcalc::interpreter::validator::is_legal_chars;
///
/// assert!(is_legal_chars("2^(x_1/.5)"));
/// assert!(!is_legal_chars("2%3"));
/// assert!(!is_legal_chars("[1]"));
/// ```
#[must_use]
pub fn is_legal_chars(text: &str) -> bool {
    first_illegal_char(text).is_none()
}

/// Sanitizes the text and runs both structural checks.
///
/// # Returns
/// The sanitized text, ready for the tree builder.
///
/// # Errors
/// - `UnbalancedBraces` if the parentheses do not pair up.
/// - `IllegalCharacter` with the first offending character otherwise.
///
/// # Example
/// ```
/// use termcalc::{error::ParseError, interpreter::validator::validate};
///
/// assert_eq!(validate("( 1 + 2 ) * 3").unwrap(), "(1+2)*3");
/// assert_eq!(validate("(1+2"), Err(ParseError::UnbalancedBraces));
/// assert_eq!(validate("1 + a$"),
///            Err(ParseError::IllegalCharacter { character: '$',
///                                               position:  3, }));
/// ```
pub fn validate(text: &str) -> Result<String, ParseError> {
    let sanitized = sanitize(text);

    if !is_brace_balanced(&sanitized) {
        debug!("rejected '{sanitized}': unbalanced parentheses");
        return Err(ParseError::UnbalancedBraces);
    }

    if let Some((position, character)) = first_illegal_char(&sanitized) {
        debug!("rejected '{sanitized}': illegal character '{character}' at {position}");
        return Err(ParseError::IllegalCharacter { character, position });
    }

    Ok(sanitized)
}
