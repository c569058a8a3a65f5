//! Middleware Module
//!
//! - **`auth`** - Token check for protected routes, `AuthUser` extractor
//! - **`access`** - Project access chain and the `ProjectMember`,
//!   `ProjectAdmin`, `ProjectCreator` extractors
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use planhub::backend::middleware::auth_middleware;
//!
//! let protected = routes.layer(from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod access;
pub mod auth;

pub use access::{check_chain, Denial, Grant, ProjectAdmin, ProjectCreator, ProjectMember, Requirement, Role};
pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
