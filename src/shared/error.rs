//! Shared Error Types
//!
//! Errors produced by the pure helpers in `shared`. The backend converts them
//! into `400 Bad Request` responses.
//!
//! # Usage
//!
//! ```rust
//! use planhub::shared::error::SharedError;
//!
//! let error = SharedError::validation("name", "name cannot be empty");
//! ```
use thiserror::Error;

/// Shared error types raised while validating input
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

    /// A date string that is not a real `YYYY-MM-DD` calendar day
    #[error("Invalid date '{value}'")]
    InvalidDate {
        /// The rejected input
        value: String,
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

    /// Create a new invalid date error
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }
}
