//! Filesystem-safe tokens for generated file names.

use crate::Cell;

/// True for characters kept as-is in a token.
#[inline]
fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Trim `text`, then replace every char outside `[A-Za-z0-9_-]` with `_`, one for one.
///
/// Non-Latin letters and digits are replaced too, so the token is plain ASCII and its char count
/// equals the trimmed input's char count.
pub fn sanitize(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| if is_token_char(c) { c } else { '_' })
        .collect()
}

/// [`sanitize`] over the textual form of a cell (empty cells give an empty token).
pub fn sanitize_value(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => sanitize(s),
        other => sanitize(&other.to_string()),
    }
}
