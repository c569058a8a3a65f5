/**
 * List Handlers
 *
 * Routes under `/project/{projectId}/trello/{trelloId}/list`. Lists are
 * ordered within their board by the position reindexer.
 */

use axum::extract::State;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db;
use super::handlers::{board_in_project, BoardPath};
use super::types::{MoveListRequest, NameRequest, ReorderListsRequest, TrelloList};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::ProjectAdmin;
use crate::backend::ordering::{self, TrelloLists};
use crate::backend::response::ApiResponse;
use crate::shared::required_text;

#[derive(Debug, Deserialize)]
pub struct ListPath {
    #[serde(rename = "trelloId")]
    pub trello_id: i64,
    #[serde(rename = "listId")]
    pub list_id: i64,
}

/// Load the list, checking the whole chain list → board → project
pub async fn list_in_board(
    pool: &SqlitePool,
    project_id: i64,
    trello_id: i64,
    list_id: i64,
) -> Result<TrelloList, BackendError> {
    board_in_project(pool, project_id, trello_id).await?;
    db::find_list(pool, trello_id, list_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("list {list_id} not found in this board")))
}

/// POST .../list
pub async fn create_list(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<BoardPath>,
    Json(request): Json<NameRequest>,
) -> Result<ApiResponse<TrelloList>, BackendError> {
    let name = required_text("name", &request.name)?;
    board_in_project(&pool, grant.project_id, path.trello_id).await?;

    let list = db::create_list(&pool, path.trello_id, name).await?;
    tracing::info!("Created list {} at position {} in board {}", list.id, list.position, path.trello_id);
    Ok(ApiResponse::created(list))
}

/// PUT .../list/{listId}
pub async fn rename_list(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<ListPath>,
    Json(request): Json<NameRequest>,
) -> Result<ApiResponse<TrelloList>, BackendError> {
    let name = required_text("name", &request.name)?;
    list_in_board(&pool, grant.project_id, path.trello_id, path.list_id).await?;

    let list = db::rename_list(&pool, path.list_id, name).await?;
    Ok(ApiResponse::ok(list))
}

/// PUT .../list/{listId}/move
pub async fn move_list(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<ListPath>,
    Json(request): Json<MoveListRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    list_in_board(&pool, grant.project_id, path.trello_id, path.list_id).await?;
    ordering::reorder_within::<TrelloLists>(&pool, path.list_id, request.position).await?;
    Ok(ApiResponse::done())
}

/// PUT .../list/reorder
pub async fn reorder_lists(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<BoardPath>,
    Json(request): Json<ReorderListsRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    board_in_project(&pool, grant.project_id, path.trello_id).await?;
    ordering::apply_full_ordering::<TrelloLists>(&pool, path.trello_id, &request.ordered_list_ids)
        .await?;
    Ok(ApiResponse::done())
}

/// DELETE .../list/{listId}
pub async fn delete_list(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<ListPath>,
) -> Result<ApiResponse<()>, BackendError> {
    list_in_board(&pool, grant.project_id, path.trello_id, path.list_id).await?;
    ordering::remove_item::<TrelloLists>(&pool, path.list_id).await?;

    tracing::info!("Deleted list {} from board {}", path.list_id, path.trello_id);
    Ok(ApiResponse::done())
}
