//! Error types for the posting run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for codec and run operations
pub type Result<T> = std::result::Result<T, PostingError>;

/// Errors that can occur while decoding, encoding or running a posting.
///
/// Business outcomes (wrong date, unknown account, overdraft breach) are
/// never errors; they are reported through the engine's outcome.
#[derive(Error, Debug)]
pub enum PostingError {
    /// Failed to open, read or write a record file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error on a named record file
    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Record (or trailing file fragment) shorter than its fixed length
    #[error("Record too short: expected {expected} bytes, got {actual}")]
    ShortRecord { expected: usize, actual: usize },

    /// Field content that cannot be decoded
    #[error("Invalid {field}: {reason}")]
    Format { field: &'static str, reason: String },

    /// Value that does not fit its fixed-width slot
    #[error("{field} does not fit its field: {reason}")]
    Overflow { field: &'static str, reason: String },

    /// Account file lists the same account ID more than once
    #[error("Duplicate account ID {0:?} in account file")]
    DuplicateAccount(String),

    /// Text that is not a two-place decimal amount
    #[error("Invalid amount {0:?}")]
    InvalidAmount(String),

    /// Text that is not an 8-digit YYYYMMDD date
    #[error("Invalid date {0:?}, expected YYYYMMDD")]
    InvalidDate(String),
}

impl PostingError {
    /// Malformed input: downstream offsets or values would be meaningless.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            PostingError::ShortRecord { .. } | PostingError::Format { .. }
        )
    }

    /// A value could not be encoded without losing digits or characters.
    pub fn is_overflow(&self) -> bool {
        matches!(self, PostingError::Overflow { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let short = PostingError::ShortRecord {
            expected: 58,
            actual: 10,
        };
        assert!(short.is_format());
        assert!(!short.is_overflow());

        let overflow = PostingError::Overflow {
            field: "current balance",
            reason: "needs 14 digits, slot holds 13".to_string(),
        };
        assert!(overflow.is_overflow());
        assert!(!overflow.is_format());
    }

    #[test]
    fn test_messages_name_the_field() {
        let err = PostingError::Format {
            field: "open date",
            reason: "non-numeric text \"2025AB01\"".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid open date: non-numeric text \"2025AB01\""
        );
    }
}
