//! Shared Module
//!
//! Helpers that do not touch the network or the database. They are used by
//! request validation in the backend and are easy to unit test on their own.

/// Shared error types
pub mod error;

/// Calendar date helpers
pub mod dates;

/// E-mail helpers
pub mod email;

/// Text field helpers
pub mod text;

pub use error::SharedError;
pub use dates::{parse_strict_date, parse_event_date, month_bounds, week_bounds};
pub use email::normalize_email;
pub use text::required_text;
