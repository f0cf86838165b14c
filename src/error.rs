//! Custom error types for gastos
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for gastos operations
#[derive(Error, Debug)]
pub enum GastosError {
    /// One of the snapshot reads failed; the whole load is discarded
    #[error("Failed to fetch {resource}: {reason}")]
    Fetch {
        resource: &'static str,
        reason: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and patches
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Session errors (no active login, unreadable token)
    #[error("Session error: {0}")]
    Session(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GastosError {
    /// Create a fetch error for the named resource
    pub fn fetch(resource: &'static str, reason: impl Into<String>) -> Self {
        Self::Fetch {
            resource,
            reason: reason.into(),
        }
    }

    /// Create a "not found" error for expense records
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a fetch error
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for GastosError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GastosError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for GastosError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for gastos operations
pub type GastosResult<T> = Result<T, GastosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GastosError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_fetch_error() {
        let err = GastosError::fetch("categorias", "connection refused");
        assert_eq!(
            err.to_string(),
            "Failed to fetch categorias: connection refused"
        );
        assert!(err.is_fetch());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_not_found_error() {
        let err = GastosError::expense_not_found("42");
        assert_eq!(err.to_string(), "Expense not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GastosError = io_err.into();
        assert!(matches!(err, GastosError::Io(_)));
    }
}
