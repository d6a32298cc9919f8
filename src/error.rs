//! Types for errors that can occur while encoding or decoding DBN.

use std::fmt;

/// An error that can occur while reading or writing DBN.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error while reading or writing.
    #[error("I/O error {context}: {source}")]
    Io {
        /// The original error.
        source: std::io::Error,
        /// The operation being attempted.
        context: String,
    },
    /// Malformed DBN: a bad magic string, a malformed metadata frame, or a bad
    /// length field.
    #[error("invalid DBN: {0}")]
    InvalidFormat(String),
    /// The input declares a DBN version outside the supported range {2, 3}.
    #[error("unsupported DBN version {0}, expected 2 or 3")]
    UnsupportedVersion(u8),
    /// The record type tag doesn't correspond to any record in the catalog.
    #[error("unknown record type {0:#04X}")]
    UnknownRecordType(u8),
    /// The input ended partway through a record payload.
    #[error(
        "truncated record with rtype {rtype:#04X}: expected {expected} bytes, got {actual}"
    )]
    TruncatedRecord {
        /// The record type tag from the header.
        rtype: u8,
        /// The size in bytes the record declared.
        expected: usize,
        /// The number of bytes actually available.
        actual: usize,
    },
    /// The writer was already closed.
    #[error("writer is closed")]
    WriterClosed,
    /// A string is too long for its fixed-width slot on the wire.
    #[error("'{string}' is too long to be encoded in DBN; it cannot be longer than {max} characters")]
    EncodeOverflow {
        /// The string that failed to encode.
        string: String,
        /// The maximum number of characters the slot holds, excluding the null
        /// terminator.
        max: usize,
    },
}

/// An alias for a `Result` with [`enum@Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a new I/O [`enum@Error`] with the given `context`.
    pub fn io(error: std::io::Error, context: impl ToString) -> Self {
        Self::Io {
            source: error,
            context: context.to_string(),
        }
    }

    /// Creates a new [`Error::InvalidFormat`] with the given `reason`.
    pub fn invalid_format(reason: impl fmt::Display) -> Self {
        Self::InvalidFormat(reason.to_string())
    }

    /// Creates a new [`Error::EncodeOverflow`] for a `string` that doesn't fit in a
    /// slot of `slot_len` bytes (including the null terminator).
    pub fn encode_overflow(string: impl ToString, slot_len: usize) -> Self {
        Self::EncodeOverflow {
            string: string.to_string(),
            max: slot_len - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_record_display_has_context() {
        let err = Error::TruncatedRecord {
            rtype: 0xA0,
            expected: 56,
            actual: 40,
        };
        let msg = err.to_string();
        assert!(msg.contains("0xA0"));
        assert!(msg.contains("56"));
        assert!(msg.contains("40"));
    }

    #[test]
    fn test_encode_overflow_reports_max_excluding_nul() {
        let err = Error::encode_overflow("ALPHABET", 5);
        assert!(matches!(&err, Error::EncodeOverflow { max: 4, .. }), "{err}");
    }
}
