//! Authentication Module
//!
//! Account creation, login, and the token keys used by the auth middleware.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers (register, login)
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - JWT tokens carry only the numeric user id
//! - Invalid credentials return 401 without saying which part was wrong

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{login, register, LoginRequest, TokenResponse};
pub use sessions::{Claims, TokenKeys};
pub use users::{PublicUser, User};
