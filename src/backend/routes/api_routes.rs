/**
 * Public and Personal Routes
 *
 * # Public
 * - `POST /auth/login`, `POST /auth/register`
 * - `GET /role`, `GET /statut`
 *
 * # Personal (token required)
 * - `/user` - profile, search, progress
 * - `/calendar` - the caller's events
 * - `/vault` - the caller's stored passwords
 */

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{login, register};
use crate::backend::calendar::handlers as calendar;
use crate::backend::catalog::{list_roles, list_statuts};
use crate::backend::server::state::AppState;
use crate::backend::user::{profile, progress, search};
use crate::backend::vault::handlers as vault;

/// Registration carries a profile photo
const REGISTER_BODY_LIMIT: usize = 8 * 1024 * 1024;

pub fn configure_public_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/login", post(login))
        .route(
            "/auth/register",
            post(register).layer(DefaultBodyLimit::max(REGISTER_BODY_LIMIT)),
        )
        .route("/role", get(list_roles))
        .route("/statut", get(list_statuts))
}

pub fn configure_personal_routes(router: Router<AppState>) -> Router<AppState> {
    router
        // User
        .route("/user", get(profile::get_profile))
        .route("/user/update", post(profile::update_profile))
        .route("/user/progressed", get(progress::progressed))
        .route("/user/search/{term}", get(search::search))
        // Calendar
        .route("/calendar", post(calendar::create_event))
        .route("/calendar/accueil/{month}/{year}", get(calendar::month_events))
        .route("/calendar/week/{day}", get(calendar::week_events))
        .route(
            "/calendar/{eventId}",
            put(calendar::update_event).delete(calendar::delete_event),
        )
        // Vault
        .route("/vault", get(vault::list_entries).post(vault::create_entry))
        .route(
            "/vault/{passwordId}",
            put(vault::update_entry).delete(vault::delete_entry),
        )
}
