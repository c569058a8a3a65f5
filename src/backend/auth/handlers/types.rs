/**
 * Authentication Handler Types
 */

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// E-mail address, normalised before lookup
    pub email: String,
    /// Plain password, verified against the stored hash
    pub password: String,
}

/// Login response
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenResponse {
    /// JWT to send as `Authorization: Bearer <token>`
    pub token: String,
}
