/**
 * Router Configuration
 *
 * Combines every route group into one Axum router.
 *
 * # Layers
 *
 * 1. Public routes (login, register, catalog, uploaded photos) are merged
 *    without any check.
 * 2. Protected routes sit behind `auth_middleware`, which answers 401 before
 *    any handler runs.
 * 3. `TraceLayer` and a request timeout wrap everything.
 */

use std::time::Duration;

use axum::{http::StatusCode, middleware::from_fn_with_state, Router};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer};

use crate::backend::middleware::auth_middleware;
use crate::backend::response::ApiResponse;
use crate::backend::routes::api_routes::{configure_personal_routes, configure_public_routes};
use crate::backend::routes::project_routes::configure_project_routes;
use crate::backend::server::state::AppState;

/// Requests running longer than this are answered with 408
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let protected = configure_project_routes(configure_personal_routes(Router::new()))
        .route_layer(from_fn_with_state(app_state.clone(), auth_middleware));

    let router = configure_public_routes(Router::new())
        .merge(protected)
        .nest_service("/uploads", ServeDir::new(&app_state.config.upload_dir))
        .fallback(|| async {
            ApiResponse::with_status(StatusCode::NOT_FOUND, "no such route")
        })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(timeout_layer(REQUEST_TIMEOUT)),
        );

    router.with_state(app_state)
}

/// Answer 408 once a request has run for `timeout`
fn timeout_layer(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}
