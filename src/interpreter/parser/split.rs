use crate::{ast::Operator, interpreter::config::SplitPolicy};

/// Finds the split point of a span.
///
/// Operators are tried in [`Operator::PRECEDENCE`] order and the first tier
/// with a depth-zero occurrence wins. Within that tier the split policy picks
/// the first or the last occurrence.
///
/// # Returns
/// The byte index of the operator and the operator itself, or `None` if no
/// operator appears outside of parentheses.
///
/// # Example
/// ```
/// use termcalc::{
///     ast::Operator,
///     interpreter::{config::SplitPolicy, parser::split::find_split},
/// };
///
/// assert_eq!(find_split("2*3+4", SplitPolicy::Leftmost), Some((3, Operator::Add)));
/// assert_eq!(find_split("8-4-2", SplitPolicy::Leftmost), Some((1, Operator::Sub)));
/// assert_eq!(find_split("8-4-2", SplitPolicy::Rightmost), Some((3, Operator::Sub)));
/// assert_eq!(find_split("(1+2)", SplitPolicy::Leftmost), None);
/// ```
#[must_use]
pub fn find_split(span: &str, policy: SplitPolicy) -> Option<(usize, Operator)> {
    Operator::PRECEDENCE.into_iter()
                        .find_map(|op| find_operation(op, span, policy).map(|index| (index, op)))
}

/// Finds a depth-zero occurrence of a single operator.
///
/// Characters inside parentheses are skipped. For balanced input the depth
/// never drops below zero.
#[must_use]
pub fn find_operation(op: Operator, span: &str, policy: SplitPolicy) -> Option<usize> {
    let target = op.symbol();
    let mut depth = 0isize;
    let mut found = None;

    for (index, ch) in span.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ if depth == 0 && ch == target => {
                if policy == SplitPolicy::Leftmost {
                    return Some(index);
                }
                found = Some(index);
            },
            _ => {},
        }
    }

    found
}

/// Checks whether the opening parenthesis at the start of the span is closed
/// by its last character.
///
/// # Example
/// ```
/// use termcalc::interpreter::parser::split::encloses_whole;
///
/// assert!(encloses_whole("(1+2)"));
/// assert!(encloses_whole("((x))"));
/// assert!(encloses_whole("()"));
/// assert!(!encloses_whole("(1)*(2)"));
/// assert!(!encloses_whole("(a)(b)"));
/// assert!(!encloses_whole("x"));
/// ```
#[must_use]
pub fn encloses_whole(span: &str) -> bool {
    let bytes = span.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'(' || bytes[bytes.len() - 1] != b')' {
        return false;
    }

    let mut depth = 0usize;
    for (index, &byte) in bytes.iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return index == bytes.len() - 1;
                }
            },
            _ => {},
        }
    }

    false
}
