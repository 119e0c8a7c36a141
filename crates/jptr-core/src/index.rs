//! Array index tokens (RFC 6901 section 4).
//!
//! ```text
//! array-index = %x30 / ( %x31-39 *(%x30-39) )   ; "0", or digits without a leading zero
//!             / "-"                             ; one past the last element
//! ```

use std::fmt;

/// A decoded array-index token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArrayIndex {
    /// A concrete zero-based position.
    At(usize),
    /// The `-` token: one past the last element. Only meaningful for Add.
    Append,
}

/// Reasons a token is not an array index. Callers attach pointer context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MalformedIndex;

impl ArrayIndex {
    /// Parse a decoded reference token as an array index.
    ///
    /// Accepts `-`, `0`, or a decimal without sign or leading zero that fits
    /// in `usize`.
    pub fn parse(token: &str) -> Option<ArrayIndex> {
        parse_index(token).ok()
    }

    /// Position this index denotes in an array of length `len`.
    /// `Append` is `len`.
    pub fn position(self, len: usize) -> usize {
        match self {
            ArrayIndex::At(i) => i,
            ArrayIndex::Append => len,
        }
    }
}

pub(crate) fn parse_index(token: &str) -> Result<ArrayIndex, MalformedIndex> {
    match token {
        "" => return Err(MalformedIndex),
        "-" => return Ok(ArrayIndex::Append),
        "0" => return Ok(ArrayIndex::At(0)),
        _ => {}
    }
    let bytes = token.as_bytes();
    if matches!(bytes[0], b'+' | b'-' | b'0') {
        return Err(MalformedIndex);
    }
    // Digits only; overflow is caught by `parse`.
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(MalformedIndex);
    }
    token
        .parse::<usize>()
        .map(ArrayIndex::At)
        .map_err(|_| MalformedIndex)
}

impl fmt::Display for ArrayIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayIndex::At(i) => write!(f, "{i}"),
            ArrayIndex::Append => f.write_str("-"),
        }
    }
}
