/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used in HTTP handlers and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Handler errors occur when processing HTTP requests:
 * - Malformed query parameters
 * - Unparseable JSON bodies
 *
 * ## Store Errors
 *
 * Store errors come from the document store:
 * - Unknown document id (404)
 * - Missing or blank required field (422)
 * - Database failure (500)
 */

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use xfdocs::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g., invalid query parameter)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Request body could not be decoded as JSON
    #[error(transparent)]
    JsonRejection(#[from] JsonRejection),

    /// Document store error
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `HandlerError` - Uses the status code from the error
    /// - `JsonRejection` - Whatever axum chose (400, 415 or 422)
    /// - `StoreError::NotFound` - 404 Not Found
    /// - `StoreError::Validation` / `SharedError` - 422 Unprocessable Entity
    /// - `StoreError::Database` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::JsonRejection(rejection) => rejection.status(),
            Self::StoreError(err) => match err {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::SharedError(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    /// Get the error message
    ///
    /// Database details are logged, not returned to the client.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::JsonRejection(rejection) => rejection.body_text(),
            Self::StoreError(StoreError::Database(_)) => "Internal server error".to_string(),
            Self::StoreError(err) => err.to_string(),
            Self::SharedError(err) => err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_store_status_code_mapping() {
        let not_found: BackendError = StoreError::NotFound(3).into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.message(), "Document 3 not found");

        let invalid: BackendError =
            StoreError::Validation(SharedError::validation("title", "can't be blank")).into();
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let db: BackendError = StoreError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(db.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.message(), "Internal server error");
    }

    #[test]
    fn test_from_shared_error() {
        let backend_error: BackendError = SharedError::validation("id", "can't be blank").into();
        assert_eq!(backend_error.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(backend_error.message().contains("'id'"));
    }
}
