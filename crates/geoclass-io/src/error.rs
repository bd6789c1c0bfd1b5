//! Error types for stream I/O.

use std::fmt;
use std::io;

/// Errors raised by [`Scanner`](crate::Scanner) and [`Writer`](crate::Writer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The underlying reader or writer failed.
    Io(io::ErrorKind),

    /// The stream ended in the middle of a value.
    UnexpectedEof,

    /// A varint had more continuation bytes than its target type can hold.
    VarintOverflow {
        /// Width of the target type in bits.
        bits: u32,
    },

    /// A string payload was not valid UTF-8.
    InvalidUtf8,

    /// The bytes decoded but do not describe a valid value.
    Corrupt(&'static str),

    /// A string length prefix exceeded the supported maximum.
    StringTooLong {
        /// The declared length.
        length: u64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(kind) => write!(f, "I/O error: {kind}"),
            Error::UnexpectedEof => write!(f, "unexpected end of stream"),
            Error::VarintOverflow { bits } => {
                write!(f, "varint does not fit into {bits} bits")
            }
            Error::InvalidUtf8 => write!(f, "string is not valid UTF-8"),
            Error::Corrupt(reason) => write!(f, "corrupt data: {reason}"),
            Error::StringTooLong { length } => {
                write!(f, "string length {length} exceeds the supported maximum")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            kind => Error::Io(kind),
        }
    }
}

/// Result type for stream operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(Error::UnexpectedEof.to_string(), "unexpected end of stream");
        assert_eq!(
            Error::VarintOverflow { bits: 32 }.to_string(),
            "varint does not fit into 32 bits"
        );
    }

    #[test]
    fn test_eof_maps_to_unexpected_eof() {
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "short read");
        assert_eq!(Error::from(err), Error::UnexpectedEof);

        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert_eq!(Error::from(err), Error::Io(io::ErrorKind::PermissionDenied));
    }
}
