//! Error types for waypost library crates.
//!
//! The exporter is a single-pass, fail-fast batch job: every error here
//! aborts the export and is surfaced to the caller. The CLI wraps these in
//! `anyhow` at the application boundary.

use thiserror::Error;

/// Main error type for waypost library operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Read or write failure on the record stream or the SQL sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The record stream declares a different record kind than the export
    /// expects. Fatal before any output is written.
    #[error("unexpected stream tag: expected {expected:#04x}, found {found:#04x}")]
    TypeMismatch { expected: u8, found: u8 },

    /// The stream ended inside a record. Clean end-of-stream is only valid
    /// at a record boundary.
    #[error("record stream truncated mid-record")]
    Truncated,

    /// A string field in the stream is not valid UTF-8.
    #[error("invalid UTF-8 in record string field")]
    InvalidString,

    /// A way segment arrived with an empty node list. Upstream guarantees
    /// at least one node per segment, so this is a defect, not data.
    #[error("segment {0} has no nodes")]
    EmptyGeometry(i32),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_display() {
        let err = Error::TypeMismatch {
            expected: 0x57,
            found: 0x56,
        };
        let msg = err.to_string();
        assert!(msg.contains("0x57"));
        assert!(msg.contains("0x56"));
    }

    #[test]
    fn test_io_error_source() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(std::error::Error::source(&err).is_some());
    }
}
