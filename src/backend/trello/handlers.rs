/**
 * Board Handlers
 *
 * Routes under `/project/{projectId}/trello`.
 */

use axum::extract::State;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db;
use super::types::{Board, BoardSummary, BoardView, NameRequest};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::{ProjectAdmin, ProjectMember};
use crate::backend::response::ApiResponse;
use crate::shared::required_text;

#[derive(Debug, Deserialize)]
pub struct BoardPath {
    #[serde(rename = "trelloId")]
    pub trello_id: i64,
}

pub async fn board_in_project(
    pool: &SqlitePool,
    project_id: i64,
    trello_id: i64,
) -> Result<Board, BackendError> {
    db::find_board(pool, project_id, trello_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("board {trello_id} not found in this project")))
}

/// GET /project/{projectId}/trello
pub async fn list_boards(
    ProjectMember(grant): ProjectMember,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<Vec<BoardSummary>>, BackendError> {
    let boards = db::list_boards(&pool, grant.project_id).await?;
    Ok(ApiResponse::ok(boards))
}

/// GET /project/{projectId}/trello/{trelloId}
pub async fn get_board(
    ProjectMember(grant): ProjectMember,
    State(pool): State<SqlitePool>,
    Path(path): Path<BoardPath>,
) -> Result<ApiResponse<BoardView>, BackendError> {
    let board = board_in_project(&pool, grant.project_id, path.trello_id).await?;
    let lists = db::board_lists(&pool, board.id).await?;
    Ok(ApiResponse::ok(BoardView { board, lists }))
}

/// POST /project/{projectId}/trello
pub async fn create_board(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Json(request): Json<NameRequest>,
) -> Result<ApiResponse<Board>, BackendError> {
    let name = required_text("name", &request.name)?;
    let board = db::create_board(&pool, grant.project_id, name).await?;

    tracing::info!("Created board {} in project {}", board.id, grant.project_id);
    Ok(ApiResponse::created(board))
}

/// PUT /project/{projectId}/trello/{trelloId}
pub async fn rename_board(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<BoardPath>,
    Json(request): Json<NameRequest>,
) -> Result<ApiResponse<Board>, BackendError> {
    let name = required_text("name", &request.name)?;
    board_in_project(&pool, grant.project_id, path.trello_id).await?;

    let board = db::rename_board(&pool, path.trello_id, name).await?;
    Ok(ApiResponse::ok(board))
}

/// DELETE /project/{projectId}/trello/{trelloId}
pub async fn delete_board(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<BoardPath>,
) -> Result<ApiResponse<()>, BackendError> {
    board_in_project(&pool, grant.project_id, path.trello_id).await?;
    db::delete_board(&pool, path.trello_id).await?;

    tracing::info!("Deleted board {} in project {}", path.trello_id, grant.project_id);
    Ok(ApiResponse::done())
}
