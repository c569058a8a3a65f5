/**
 * Backend Error Types
 *
 * This module defines the error type returned by every HTTP handler.
 *
 * # Error Categories
 *
 * ## Request Errors
 *
 * - `NotFound` - referenced row does not exist (404)
 * - `Validation` - malformed or inconsistent input (400)
 * - `Conflict` - unique value already taken (400, see `status_code`)
 *
 * ## Access Errors
 *
 * - `Unauthorized` - missing or invalid token (401)
 * - `Forbidden` - authenticated but not allowed (403)
 *
 * ## Internal Errors
 *
 * Persistence, hashing, token signing and filesystem failures all map to
 * 500. Their details are logged, never sent to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::ordering::OrderingError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use planhub::backend::error::BackendError;
///
/// let err = BackendError::not_found("todo 4 not found");
/// let err = BackendError::validation("name cannot be empty");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Referenced resource does not exist
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Input failed validation
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Unique value already in use
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Missing or invalid credentials
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Caller lacks the required rights
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Internal failure that is not a database error
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },

    /// Error from the shared validation helpers
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Error from the position reindexer
    #[error(transparent)]
    Ordering(#[from] OrderingError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    /// Filesystem error (uploads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BackendError {
    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `NotFound`, `sqlx::Error::RowNotFound` - 404
    /// - `Validation`, `Conflict`, `SharedError` - 400
    /// - `Unauthorized` - 401
    /// - `Forbidden` - 403
    /// - `Ordering` - depends on the reindexer error
    /// - everything else - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Ordering(err) => match err {
                OrderingError::NotFound { .. } => StatusCode::NOT_FOUND,
                OrderingError::InvalidPosition { .. } | OrderingError::OrderingMismatch { .. } => {
                    StatusCode::BAD_REQUEST
                }
                OrderingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            Self::Internal { .. } | Self::Database(_) | Self::Password(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the message sent to the client
    ///
    /// Internal failures collapse to a generic text; the detail goes to the log.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { message }
            | Self::Validation { message }
            | Self::Conflict { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::Ordering(OrderingError::Database(_)) => "internal error".to_string(),
            Self::Ordering(err) => err.to_string(),
            Self::Database(sqlx::Error::RowNotFound) => "resource not found".to_string(),
            Self::Internal { .. } | Self::Database(_) | Self::Password(_) | Self::Io(_) => {
                "internal error".to_string()
            }
        }
    }
}
