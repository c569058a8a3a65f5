//! Server Module
//!
//! Configuration, application state and app creation for the Axum server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration, pool creation
//! └── init.rs         - App creation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use planhub::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), sqlx::Error> {
//! let app = create_app(ServerConfig::from_env()).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{connect_database, run_migrations, ServerConfig};
pub use init::{create_app, create_app_with_pool};
pub use state::AppState;
