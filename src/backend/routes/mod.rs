//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation, auth layer, tracing
//! - **`api_routes`** - Public routes and the caller's personal data
//! - **`project_routes`** - Projects and their Gantt charts, to-dos, boards
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs             - Module exports and documentation
//! ├── router.rs          - Main router creation
//! ├── api_routes.rs      - auth, catalog, user, calendar, vault
//! └── project_routes.rs  - project, gantt, todo, trello
//! ```
//!
//! # Path Parameters
//!
//! Parameter names are part of the contract with the access chain, which
//! reads `{projectId}` by name: `{projectId}`, `{ganttId}`, `{activityId}`,
//! `{toDoId}`, `{taskId}`, `{trelloId}`, `{listId}`, `{cardId}`,
//! `{eventId}`, `{passwordId}`.

/// Main router creation
pub mod router;

/// Public and personal routes
pub mod api_routes;

/// Project-scoped routes
pub mod project_routes;

pub use router::create_router;
