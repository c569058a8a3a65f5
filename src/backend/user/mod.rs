//! Current-user endpoints
//!
//! - **`profile`** - read and update the caller's account
//! - **`search`** - quick search across everything the caller can see
//! - **`progress`** - completed work per month

pub mod profile;
pub mod progress;
pub mod search;

pub use search::{SearchKind, SearchResult};
