/**
 * Application State Management
 *
 * `AppState` is built once in `init` and cloned into every request. It owns
 * the single connection pool of the process; no module opens a connection of
 * its own.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only what they use:
 *
 * ```rust
 * use axum::extract::State;
 * use sqlx::SqlitePool;
 *
 * async fn handler(State(pool): State<SqlitePool>) {
 *     // query with &pool
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::TokenKeys;
use crate::backend::server::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: SqlitePool,

    /// Token signing and verification keys
    pub tokens: TokenKeys,

    /// Configuration loaded at startup
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Assemble the state from an open pool and the loaded configuration
    pub fn new(pool: SqlitePool, config: ServerConfig) -> Self {
        let tokens = TokenKeys::new(&config.jwt_secret, config.token_ttl_days);
        Self {
            pool,
            tokens,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for TokenKeys {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
