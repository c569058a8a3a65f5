/**
 * Card Handlers
 *
 * Routes under `/project/{projectId}/trello/{trelloId}/list/{listId}/card`.
 * `reorder` moves a card inside its list or to another list of the same
 * board.
 */

use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db;
use super::lists::{list_in_board, ListPath};
use super::types::{Card, CreateCardRequest, MoveCardRequest, UpdateCardRequest};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::ProjectAdmin;
use crate::backend::ordering::{self, TrelloCards};
use crate::backend::project::ensure_members;
use crate::backend::response::ApiResponse;
use crate::shared::{parse_strict_date, required_text};

#[derive(Debug, Deserialize)]
pub struct CardPath {
    #[serde(rename = "trelloId")]
    pub trello_id: i64,
    #[serde(rename = "listId")]
    pub list_id: i64,
    #[serde(rename = "cardId")]
    pub card_id: i64,
}

async fn card_in_list(pool: &SqlitePool, project_id: i64, path: &CardPath) -> Result<Card, BackendError> {
    list_in_board(pool, project_id, path.trello_id, path.list_id).await?;
    db::find_card(pool, path.list_id, path.card_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("card {} not found in this list", path.card_id)))
}

/// POST .../card
pub async fn create_card(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<ListPath>,
    Json(request): Json<CreateCardRequest>,
) -> Result<ApiResponse<Card>, BackendError> {
    let name = required_text("name", &request.name)?;
    let real_date = match request.real_date.as_deref() {
        Some(raw) => parse_strict_date(raw)?,
        None => Utc::now().date_naive(),
    };
    let description = request.description.as_deref().map(str::trim).unwrap_or_default();
    list_in_board(&pool, grant.project_id, path.trello_id, path.list_id).await?;
    ensure_members(&pool, grant.project_id, &request.user_ids).await?;

    let card_id =
        db::create_card(&pool, path.list_id, name, description, real_date, &request.user_ids).await?;
    let card = db::find_card(&pool, path.list_id, card_id)
        .await?
        .ok_or_else(|| BackendError::internal("created card vanished"))?;

    tracing::info!("Created card {} in list {}", card.id, path.list_id);
    Ok(ApiResponse::created(card))
}

/// PUT .../card/{cardId}
pub async fn update_card(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<CardPath>,
    Json(request): Json<UpdateCardRequest>,
) -> Result<ApiResponse<Card>, BackendError> {
    if request.name.is_none()
        && request.description.is_none()
        && request.real_date.is_none()
        && request.user_ids.is_none()
    {
        return Err(BackendError::validation("nothing to update"));
    }
    let name = request.name.as_deref().map(|name| required_text("name", name)).transpose()?;
    let real_date = request.real_date.as_deref().map(parse_strict_date).transpose()?;
    let description = request.description.as_deref().map(str::trim);
    card_in_list(&pool, grant.project_id, &path).await?;
    if let Some(user_ids) = &request.user_ids {
        ensure_members(&pool, grant.project_id, user_ids).await?;
    }

    db::update_card(
        &pool,
        path.card_id,
        name,
        description,
        real_date,
        request.user_ids.as_deref(),
    )
    .await?;
    let card = card_in_list(&pool, grant.project_id, &path).await?;
    Ok(ApiResponse::ok(card))
}

/// PUT .../card/reorder/{cardId}
pub async fn move_card(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<CardPath>,
    Json(request): Json<MoveCardRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    card_in_list(&pool, grant.project_id, &path).await?;
    // the destination must hang off the same board
    list_in_board(&pool, grant.project_id, path.trello_id, request.list_id).await?;

    ordering::move_item::<TrelloCards>(&pool, path.card_id, request.list_id, request.new_position)
        .await?;
    Ok(ApiResponse::done())
}

/// PUT .../card/realised/{cardId}
pub async fn realise_card(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<CardPath>,
) -> Result<ApiResponse<Card>, BackendError> {
    card_in_list(&pool, grant.project_id, &path).await?;
    db::mark_card_realised(&pool, path.card_id, grant.user_id).await?;

    let card = card_in_list(&pool, grant.project_id, &path).await?;
    tracing::info!("User {} completed card {}", grant.user_id, card.id);
    Ok(ApiResponse::ok(card))
}

/// DELETE .../card/{cardId}
pub async fn delete_card(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<CardPath>,
) -> Result<ApiResponse<()>, BackendError> {
    card_in_list(&pool, grant.project_id, &path).await?;
    ordering::remove_item::<TrelloCards>(&pool, path.card_id).await?;

    tracing::info!("Deleted card {} from list {}", path.card_id, path.list_id);
    Ok(ApiResponse::done())
}
