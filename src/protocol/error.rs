//! tsctl codec error types

use thiserror::Error;

/// tsctl codec errors
#[derive(Error, Debug)]
pub enum Error {
    /// Input ran out while reading a field
    #[error("short read: {field} needs {needed} more bytes")]
    ShortRead {
        /// Field being read
        field: &'static str,
        /// Bytes the field requires
        needed: usize,
    },

    /// IO error from the underlying stream or sink
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Caller supplied an out-of-range argument to a message builder
    #[error("invalid {name}: {value}")]
    InvalidArgument {
        /// Argument name
        name: &'static str,
        /// Rejected value
        value: u32,
    },

    /// Scalar reply carried a tag outside the width table
    #[error("unknown reply tag: {tag:#04x}")]
    UnknownReplyTag {
        /// Tag byte found in the reply header
        tag: u8,
    },

    /// String reply carried a tag other than the string marker
    #[error("unexpected reply tag: expected {expected:#04x}, got {found:#04x}")]
    UnexpectedReplyTag {
        /// Tag required by the requested shape
        expected: u8,
        /// Tag byte found in the reply header
        found: u8,
    },

    /// A decoded value was used as the wrong shape
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}

impl Error {
    /// Check whether the error came from exhausted input
    #[must_use]
    pub const fn is_short_read(&self) -> bool {
        matches!(self, Self::ShortRead { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
