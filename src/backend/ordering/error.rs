//! Reindexer errors

use thiserror::Error;

/// Failure of a reorder, move or bulk ordering
///
/// A failed call never leaves partial shifts behind: the transaction is
/// rolled back before the error is returned.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// The item or container does not exist
    #[error("{what} {id} not found")]
    NotFound { what: &'static str, id: i64 },

    /// Target position outside `1..=max`
    #[error("position {position} is out of range 1..={max}")]
    InvalidPosition { position: i64, max: i64 },

    /// Bulk ordering does not describe the container's current items
    #[error("ordering does not match the container: {reason}")]
    OrderingMismatch { reason: String },

    /// Persistence failure inside the transaction
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl OrderingError {
    pub(crate) fn mismatch(reason: impl Into<String>) -> Self {
        Self::OrderingMismatch {
            reason: reason.into(),
        }
    }
}
