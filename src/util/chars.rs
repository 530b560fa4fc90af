/// Returns `true` for the characters removed by sanitizing: space, tab,
/// newline and carriage return.
#[must_use]
pub const fn is_insignificant(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Checks a name against the identifier rules.
///
/// The first character must be an ASCII letter or `_`, every following one an
/// ASCII letter, digit or `_`. The empty name is rejected.
///
/// # Example
/// ```
/// use termcalc::util::chars::is_legal_name;
///
/// assert!(is_legal_name("_x1"));
/// assert!(is_legal_name("radius"));
/// assert!(!is_legal_name("1x"));
/// assert!(!is_legal_name(""));
/// assert!(!is_legal_name("a.b"));
/// ```
#[must_use]
pub fn is_legal_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'_' => {
            bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        },
        _ => false,
    }
}

/// Parses a numeric literal leaf.
///
/// Only plain decimal spellings made of digits and at most one `.` are
/// accepted. Signs and exponents never reach a leaf because `-` is an
/// operator, and spellings like `inf` are left to symbol resolution.
///
/// # Example
/// ```
/// use termcalc::util::chars::parse_literal;
///
/// assert_eq!(parse_literal("2.5"), Some(2.5));
/// assert_eq!(parse_literal(".5"), Some(0.5));
/// assert_eq!(parse_literal("1.2.3"), None);
/// assert_eq!(parse_literal("inf"), None);
/// assert_eq!(parse_literal("."), None);
/// ```
#[must_use]
pub fn parse_literal(span: &str) -> Option<f32> {
    let digits_only = span.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if !digits_only || !span.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    span.parse().ok()
}
