/// Character classification helpers.
///
/// This module holds the small character tests shared by the validator, the
/// tree builder and the scope stack: what counts as insignificant whitespace,
/// which names are legal identifiers and which spans read as numeric
/// literals.
pub mod chars;
