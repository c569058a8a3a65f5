/**
 * Profile Handlers
 *
 * `GET /user` and `POST /user/update`. The e-mail is normalised the same way
 * as on register and must stay unique; a new password is hashed with the
 * configured bcrypt cost.
 */

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::{self, UserChanges};
use crate::backend::auth::PublicUser;
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::middleware::AuthUser;
use crate::backend::response::ApiResponse;
use crate::backend::server::AppState;
use crate::shared::{normalize_email, required_text};

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

/// GET /user
pub async fn get_profile(
    AuthUser(user): AuthUser,
    State(app_state): State<AppState>,
) -> Result<ApiResponse<PublicUser>, BackendError> {
    let found = users::get_user_by_id(&app_state.pool, user.user_id)
        .await?
        .ok_or_else(|| BackendError::unauthorized("user no longer exists"))?;
    Ok(ApiResponse::ok(found.into()))
}

/// POST /user/update
pub async fn update_profile(
    AuthUser(user): AuthUser,
    State(app_state): State<AppState>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<ApiResponse<PublicUser>, BackendError> {
    let email = request
        .email
        .as_deref()
        .map(|email| required_text("email", email).map(normalize_email))
        .transpose()?;
    let name = request
        .name
        .as_deref()
        .map(|name| required_text("name", name).map(str::to_string))
        .transpose()?;
    let first_name = request
        .first_name
        .as_deref()
        .map(|first_name| required_text("firstName", first_name).map(str::to_string))
        .transpose()?;
    let password_hash = match request.password.as_deref() {
        Some(password) => {
            required_text("password", password)?;
            Some(bcrypt::hash(password, app_state.config.bcrypt_cost)?)
        }
        None => None,
    };

    let changes = UserChanges {
        email,
        password_hash,
        name,
        first_name,
    };
    if changes.is_empty() {
        return Err(BackendError::validation("nothing to update"));
    }

    if let Some(email) = &changes.email {
        if users::email_taken(&app_state.pool, email, Some(user.user_id)).await? {
            return Err(BackendError::conflict("e-mail already in use"));
        }
    }

    let updated = users::update_user(&app_state.pool, user.user_id, changes)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                BackendError::conflict("e-mail already in use")
            }
            other => other.into(),
        })?;

    tracing::info!("User {} updated their profile", user.user_id);
    Ok(ApiResponse::ok(updated.into()))
}
