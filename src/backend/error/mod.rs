//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and its
//! conversion into the `{message, data}` response envelope.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use planhub::backend::error::BackendError;
//!
//! async fn handler() -> Result<(), BackendError> {
//!     Err(BackendError::not_found("todo not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
