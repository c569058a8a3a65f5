//! Backend Module
//!
//! This module contains all server-side code for planhub: an Axum HTTP
//! server in front of a SQLite database.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Configuration, application state, app creation
//! - **`routes`** - Router assembly
//! - **`middleware`** - Token check and the project access chain
//! - **`error`** / **`response`** - Error type and the `{message, data}` envelope
//! - **`extract`** - `Json` / `Path` extractors rejecting with `BackendError`
//! - **`ordering`** - Position reindexer for ordered collections
//! - **`auth`**, **`user`** - Accounts, tokens, search, progress
//! - **`project`**, **`gantt`**, **`todo`**, **`trello`** - Project workspaces
//! - **`calendar`**, **`vault`**, **`catalog`** - Personal data and reference data
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Config, state, init
//! ├── routes/         - Route configuration
//! ├── middleware/     - auth + access chain
//! ├── error/          - Error types
//! ├── response.rs     - Response envelope
//! ├── extract.rs      - Json / Path extractors
//! ├── ordering/       - Position reindexer
//! ├── auth/           - Login, register, JWT, users table
//! ├── user/           - Profile, search, progress
//! ├── project/        - Projects and memberships
//! ├── gantt/          - Charts and activities
//! ├── todo/           - To-dos and tasks
//! ├── trello/         - Boards, lists, cards
//! ├── calendar/       - Personal events
//! ├── vault/          - Password vault
//! └── catalog/        - Roles and statuses
//! ```
//!
//! # State Management
//!
//! `AppState` owns the one `SqlitePool` of the process together with the
//! token keys and the loaded configuration. Handlers pull the pieces they
//! need through `FromRef`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Response envelope
pub mod response;

/// Extractors answering malformed input with 400
pub mod extract;

/// Middleware for request processing
pub mod middleware;

/// Position reindexer
pub mod ordering;

/// Authentication and user management
pub mod auth;

/// Current-user endpoints
pub mod user;

/// Projects and memberships
pub mod project;

/// Gantt charts
pub mod gantt;

/// To-do lists
pub mod todo;

/// Trello-style boards
pub mod trello;

/// Calendar events
pub mod calendar;

/// Password vault
pub mod vault;

/// Roles and statuses
pub mod catalog;

/// Re-export commonly used types
pub use server::create_app;
pub use error::BackendError;
pub use response::ApiResponse;
