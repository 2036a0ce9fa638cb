//! Custom error types for the till ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The reporting engine itself never fails;
//! these errors come from storage, configuration and import.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for till ledger operations
#[derive(Error, Debug)]
pub enum TillError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl TillError {
    /// Create a "not found" error for the entry recorded on a date
    pub fn entry_not_found(date: NaiveDate) -> Self {
        Self::NotFound {
            entity_type: "Entry",
            identifier: date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for TillError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for TillError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for till ledger operations
pub type TillResult<T> = Result<T, TillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TillError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_entry_not_found() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let err = TillError::entry_not_found(date);
        assert_eq!(err.to_string(), "Entry not found: 2024-06-03");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let till_err: TillError = io_err.into();
        assert!(matches!(till_err, TillError::Io(_)));
    }
}
