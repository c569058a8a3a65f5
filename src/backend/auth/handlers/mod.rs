//! Authentication Handlers Module
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── register.rs - Multipart registration with optional photo
//! └── login.rs    - Credential check, token issue
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /auth/register - Create an account
//! - **`login`** - POST /auth/login - Exchange credentials for a token
//!
//! Both routes are public; everything else sits behind `auth_middleware`.

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

// Re-export commonly used types
pub use types::{LoginRequest, TokenResponse};

// Re-export handlers
pub use login::login;
pub use register::register;
