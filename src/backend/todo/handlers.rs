/**
 * To-do Handlers
 *
 * Routes under `/project/{projectId}/todo`. Reads need membership, writes
 * need the `Admin` role. A `toDoId` that belongs to another project is
 * answered with 404.
 */

use axum::extract::State;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db;
use super::types::{NameRequest, Todo, TodoSummary};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::{ProjectAdmin, ProjectMember};
use crate::backend::response::ApiResponse;
use crate::shared::required_text;

#[derive(Debug, Deserialize)]
pub struct TodoPath {
    #[serde(rename = "toDoId")]
    pub todo_id: i64,
}

/// Load the to-do or answer 404 when it is not part of the project
pub async fn todo_in_project(
    pool: &SqlitePool,
    project_id: i64,
    todo_id: i64,
) -> Result<Todo, BackendError> {
    db::find_todo(pool, project_id, todo_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("todo {todo_id} not found in this project")))
}

/// GET /project/{projectId}/todo
pub async fn list_todos(
    ProjectMember(grant): ProjectMember,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<Vec<TodoSummary>>, BackendError> {
    let todos = db::list_todos(&pool, grant.project_id).await?;
    Ok(ApiResponse::ok(todos))
}

/// POST /project/{projectId}/todo
pub async fn create_todo(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Json(request): Json<NameRequest>,
) -> Result<ApiResponse<Todo>, BackendError> {
    let name = required_text("name", &request.name)?;
    let todo = db::create_todo(&pool, grant.project_id, name).await?;

    tracing::info!("Created todo {} in project {}", todo.id, grant.project_id);
    Ok(ApiResponse::created(todo))
}

/// PUT /project/{projectId}/todo/{toDoId}
pub async fn rename_todo(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<TodoPath>,
    Json(request): Json<NameRequest>,
) -> Result<ApiResponse<Todo>, BackendError> {
    let name = required_text("name", &request.name)?;
    todo_in_project(&pool, grant.project_id, path.todo_id).await?;

    let todo = db::rename_todo(&pool, path.todo_id, name).await?;
    Ok(ApiResponse::ok(todo))
}

/// DELETE /project/{projectId}/todo/{toDoId}
pub async fn delete_todo(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<TodoPath>,
) -> Result<ApiResponse<()>, BackendError> {
    todo_in_project(&pool, grant.project_id, path.todo_id).await?;
    db::delete_todo(&pool, path.todo_id).await?;

    tracing::info!("Deleted todo {} in project {}", path.todo_id, grant.project_id);
    Ok(ApiResponse::done())
}
