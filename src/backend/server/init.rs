/**
 * Server Initialization
 *
 * The server initialization follows these steps:
 * 1. Open the database pool and run migrations
 * 2. Build the application state
 * 3. Create the router with all routes and layers
 *
 * Tests skip step 1 and hand an in-memory pool to `create_app_with_pool`.
 */

use axum::Router;
use sqlx::SqlitePool;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the database cannot be opened or migrated.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, sqlx::Error> {
    tracing::info!("Initializing planhub backend server");

    let pool = connect_database(&config.database_url).await?;
    Ok(create_app_with_pool(pool, config))
}

/// Build the router around an already migrated pool
pub fn create_app_with_pool(pool: SqlitePool, config: ServerConfig) -> Router<()> {
    let app_state = AppState::new(pool, config);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    app
}
