//! Error types for the record model.

use thiserror::Error;

/// Result type alias for record operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by the record model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Attempted to change a column of a constructed record.
    #[error("record is immutable: cannot set column `{column}`")]
    ImmutableRecord { column: String },
}

impl Error {
    /// Creates an immutable record error.
    pub fn immutable_record(column: impl Into<String>) -> Self {
        Error::ImmutableRecord {
            column: column.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::immutable_record("salary");
        assert!(err.to_string().contains("immutable"));
        assert!(err.to_string().contains("salary"));
    }

    #[test]
    fn test_error_constructors() {
        match Error::immutable_record("id") {
            Error::ImmutableRecord { column } => assert_eq!(column, "id"),
        }
    }
}
