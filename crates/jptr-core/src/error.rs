//! Error types for pointer parsing, resolution, and structural operations.

use crate::index::ArrayIndex;
use crate::ops::Operation;
use crate::value::ValueKind;
use thiserror::Error;

/// Errors that can occur while parsing a pointer or applying it to a document.
///
/// Every failure is terminal and leaves the input document untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PointerError {
    /// The pointer text is non-empty and does not start with `/`.
    #[error("malformed JSON pointer '{pointer}': a non-empty pointer must begin with '/'")]
    MalformedPointer { pointer: String },

    /// A token used against an array is not a valid RFC 6901 array index.
    #[error("malformed array index '{token}' in pointer '{pointer}'")]
    MalformedIndex { pointer: String, token: String },

    /// A non-final token tried to descend into a scalar value.
    #[error("reference target must be an object or array, found {found} in pointer '{pointer}'")]
    NotContainer { pointer: String, found: ValueKind },

    /// A required object member is absent.
    #[error("no member named '{member}' for pointer '{pointer}'")]
    NoSuchMember { pointer: String, member: String },

    /// An array index is outside the range the operation allows.
    #[error("array index {index} out of range for length {len} in pointer '{pointer}'")]
    IndexOutOfRange {
        pointer: String,
        index: ArrayIndex,
        len: usize,
    },

    /// Replace or Remove against the whole document.
    #[error("{operation} is not permitted on the root pointer")]
    InvalidOperation { operation: Operation },
}

/// Category of a [`PointerError`], without the context fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedPointer,
    MalformedIndex,
    NotContainer,
    NoSuchMember,
    IndexOutOfRange,
    InvalidOperation,
}

impl PointerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PointerError::MalformedPointer { .. } => ErrorKind::MalformedPointer,
            PointerError::MalformedIndex { .. } => ErrorKind::MalformedIndex,
            PointerError::NotContainer { .. } => ErrorKind::NotContainer,
            PointerError::NoSuchMember { .. } => ErrorKind::NoSuchMember,
            PointerError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            PointerError::InvalidOperation { .. } => ErrorKind::InvalidOperation,
        }
    }
}

/// Convenience alias used throughout jptr-core.
pub type Result<T> = std::result::Result<T, PointerError>;
