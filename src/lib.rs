//! planhub - Main Library
//!
//! planhub is a project-management HTTP backend built with Rust. It exposes
//! projects, calendars, Gantt charts, to-do lists, Trello-style boards, a
//! password vault and user accounts behind token authentication and
//! per-project role checks.
//!
//! # Module Structure
//!
//! - **`shared`** - Pure helpers with no I/O
//!   - Strict calendar-date parsing, e-mail normalisation
//!   - Validation error type
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, routes and middleware
//!   - SQLite persistence through a single injected `sqlx` pool
//!   - The position reindexer used by lists, cards and to-do tasks
//!
//! # Usage
//!
//! ```rust,no_run
//! use planhub::backend::server::config::ServerConfig;
//! use planhub::backend::server::init::create_app;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env();
//! let app = create_app(config).await?;
//! // Serve with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for pure validation helpers
//! - `backend::BackendError` for handlers, rendered as the `{message, data}`
//!   envelope
//! - `backend::ordering::OrderingError` for reindexer failures

/// Shared helpers and validation types
pub mod shared;

/// Backend server-side code
pub mod backend;
