//! Common test utilities and helpers
//!
//! - Database fixtures (in-memory pool, direct inserts)
//! - A `TestServer` wrapped around the real router
//! - Custom assertion macros

pub mod assertions;

pub use auth_helpers::*;
pub use database::*;
