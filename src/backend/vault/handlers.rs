/**
 * Vault Handlers
 *
 * Routes under `/vault`. Another user's entry answers 404.
 */

use axum::extract::State;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::{db, CreateEntryRequest, UpdateEntryRequest, VaultEntry};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::AuthUser;
use crate::backend::response::ApiResponse;
use crate::shared::required_text;

#[derive(Debug, Deserialize)]
pub struct EntryPath {
    #[serde(rename = "passwordId")]
    pub password_id: i64,
}

/// `Some` only for a value that is not blank
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// GET /vault
pub async fn list_entries(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<Vec<VaultEntry>>, BackendError> {
    let entries = db::list_entries(&pool, user.user_id).await?;
    Ok(ApiResponse::ok(entries))
}

/// POST /vault
pub async fn create_entry(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Json(request): Json<CreateEntryRequest>,
) -> Result<ApiResponse<VaultEntry>, BackendError> {
    let site_name = required_text("siteName", &request.site_name)?;
    let username = required_text("username", &request.username)?;
    // ciphertext is stored untrimmed
    required_text("password", &request.password)?;
    required_text("iv", &request.iv)?;

    let entry = db::create_entry(
        &pool,
        user.user_id,
        site_name,
        username,
        &request.password,
        &request.iv,
    )
    .await?;
    tracing::debug!("User {} added vault entry {}", user.user_id, entry.id);
    Ok(ApiResponse::created(entry))
}

/// PUT /vault/{passwordId}
pub async fn update_entry(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Path(path): Path<EntryPath>,
    Json(request): Json<UpdateEntryRequest>,
) -> Result<ApiResponse<VaultEntry>, BackendError> {
    let site_name = non_blank(request.site_name.as_deref()).map(str::trim);
    let username = non_blank(request.username.as_deref()).map(str::trim);
    let password = non_blank(request.password.as_deref());
    let iv = non_blank(request.iv.as_deref());
    if site_name.is_none() && username.is_none() && password.is_none() && iv.is_none() {
        return Err(BackendError::validation("nothing to update"));
    }

    let entry = db::update_entry(&pool, user.user_id, path.password_id, site_name, username, password, iv)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("vault entry {} not found", path.password_id)))?;
    Ok(ApiResponse::ok(entry))
}

/// DELETE /vault/{passwordId}
pub async fn delete_entry(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Path(path): Path<EntryPath>,
) -> Result<ApiResponse<()>, BackendError> {
    if !db::delete_entry(&pool, user.user_id, path.password_id).await? {
        return Err(BackendError::not_found(format!("vault entry {} not found", path.password_id)));
    }
    Ok(ApiResponse::done())
}
