/**
 * Login Handler
 *
 * POST /auth/login
 *
 * 1. Normalise the e-mail and look the user up
 * 2. Verify the password using bcrypt
 * 3. Issue a JWT token
 *
 * Unknown e-mail and wrong password both answer 401 with the same text.
 */

use axum::extract::State;

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::response::ApiResponse;
use crate::backend::server::state::AppState;
use crate::shared::normalize_email;

const BAD_CREDENTIALS: &str = "invalid e-mail or password";

pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<ApiResponse<TokenResponse>, BackendError> {
    let email = normalize_email(&request.email);

    let user = get_user_by_email(&app_state.pool, &email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login for unknown e-mail: {}", email);
            BackendError::unauthorized(BAD_CREDENTIALS)
        })?;

    if !bcrypt::verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user {}", user.id);
        return Err(BackendError::unauthorized(BAD_CREDENTIALS));
    }

    let token = app_state.tokens.create_token(user.id).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        BackendError::internal("token signing failed")
    })?;

    tracing::info!("User {} logged in", user.id);
    Ok(ApiResponse::ok(TokenResponse { token }))
}
