//! Shared Error Types
//!
//! Errors raised by request validation. They are shared because the client
//! and the backend validate the same request bodies.
//!
//! # Usage
//!
//! ```rust
//! use xfdocs::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "can't be blank");
//! assert_eq!(error.field(), "title");
//! ```
use thiserror::Error;

/// Shared error types that can occur in both client and backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("title", "can't be blank");
        match &error {
            SharedError::ValidationError { field, message } => {
                assert_eq!(field, "title");
                assert_eq!(message, "can't be blank");
            }
        }
        assert_eq!(error.field(), "title");
    }

    #[test]
    fn test_validation_display() {
        let error = SharedError::validation("body", "can't be blank");
        assert_eq!(error.to_string(), "Validation error in field 'body': can't be blank");
    }
}
