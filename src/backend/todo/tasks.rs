/**
 * To-do Task Handlers
 *
 * Routes under `/project/{projectId}/todo/{toDoId}/task`. Tasks are ordered
 * by the position reindexer: creation appends, `move` relocates one task,
 * `order` replaces the whole ordering, delete closes the gap.
 */

use axum::extract::State;
use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db;
use super::handlers::{todo_in_project, TodoPath};
use super::types::{CreateTaskRequest, MoveTaskRequest, OrderTasksRequest, Task, UpdateTaskRequest};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::{ProjectAdmin, ProjectMember};
use crate::backend::ordering::{self, TodoTasks};
use crate::backend::project::ensure_members;
use crate::backend::response::ApiResponse;
use crate::shared::{parse_strict_date, required_text};

#[derive(Debug, Deserialize)]
pub struct TaskPath {
    #[serde(rename = "toDoId")]
    pub todo_id: i64,
    #[serde(rename = "taskId")]
    pub task_id: i64,
}

async fn task_in_todo(
    pool: &SqlitePool,
    project_id: i64,
    path: &TaskPath,
) -> Result<Task, BackendError> {
    todo_in_project(pool, project_id, path.todo_id).await?;
    db::find_task(pool, path.todo_id, path.task_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("task {} not found in this todo", path.task_id)))
}

/// GET .../task - open tasks by position
pub async fn list_tasks(
    ProjectMember(grant): ProjectMember,
    State(pool): State<SqlitePool>,
    Path(path): Path<TodoPath>,
) -> Result<ApiResponse<Vec<Task>>, BackendError> {
    todo_in_project(&pool, grant.project_id, path.todo_id).await?;
    let tasks = db::list_tasks(&pool, path.todo_id, false).await?;
    Ok(ApiResponse::ok(tasks))
}

/// GET .../task/realised
pub async fn list_realised_tasks(
    ProjectMember(grant): ProjectMember,
    State(pool): State<SqlitePool>,
    Path(path): Path<TodoPath>,
) -> Result<ApiResponse<Vec<Task>>, BackendError> {
    todo_in_project(&pool, grant.project_id, path.todo_id).await?;
    let tasks = db::list_tasks(&pool, path.todo_id, true).await?;
    Ok(ApiResponse::ok(tasks))
}

/// POST .../task
pub async fn create_task(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<TodoPath>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<ApiResponse<Task>, BackendError> {
    let name = required_text("name", &request.name)?;
    let real_date = request.real_date.as_deref().map(parse_strict_date).transpose()?;
    todo_in_project(&pool, grant.project_id, path.todo_id).await?;
    ensure_members(&pool, grant.project_id, &request.user_ids).await?;

    let task_id = db::create_task(&pool, path.todo_id, name, real_date, &request.user_ids).await?;
    let task = db::find_task(&pool, path.todo_id, task_id)
        .await?
        .ok_or_else(|| BackendError::internal("created task vanished"))?;

    tracing::info!("Created task {} in todo {}", task.id, path.todo_id);
    Ok(ApiResponse::created(task))
}

/// PUT .../task/{taskId}
pub async fn update_task(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<TaskPath>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<ApiResponse<Task>, BackendError> {
    if request.name.is_none() && request.real_date.is_none() && request.user_ids.is_none() {
        return Err(BackendError::validation("nothing to update"));
    }
    let name = request.name.as_deref().map(|name| required_text("name", name)).transpose()?;
    let real_date = request.real_date.as_deref().map(parse_strict_date).transpose()?;
    task_in_todo(&pool, grant.project_id, &path).await?;
    if let Some(user_ids) = &request.user_ids {
        ensure_members(&pool, grant.project_id, user_ids).await?;
    }

    db::update_task(&pool, path.task_id, name, real_date, request.user_ids.as_deref()).await?;
    let task = task_in_todo(&pool, grant.project_id, &path).await?;
    Ok(ApiResponse::ok(task))
}

/// PUT .../task/{taskId}/realised
pub async fn realise_task(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<TaskPath>,
) -> Result<ApiResponse<Task>, BackendError> {
    task_in_todo(&pool, grant.project_id, &path).await?;
    db::mark_task_realised(&pool, path.task_id, grant.user_id, Utc::now().date_naive()).await?;

    let task = task_in_todo(&pool, grant.project_id, &path).await?;
    tracing::info!("User {} completed task {}", grant.user_id, task.id);
    Ok(ApiResponse::ok(task))
}

/// PUT .../task/{taskId}/move
pub async fn move_task(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<TaskPath>,
    Json(request): Json<MoveTaskRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    task_in_todo(&pool, grant.project_id, &path).await?;
    ordering::reorder_within::<TodoTasks>(&pool, path.task_id, request.position).await?;
    Ok(ApiResponse::done())
}

/// PUT .../task/order
pub async fn order_tasks(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<TodoPath>,
    Json(request): Json<OrderTasksRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    todo_in_project(&pool, grant.project_id, path.todo_id).await?;
    ordering::apply_full_ordering::<TodoTasks>(&pool, path.todo_id, &request.ordered_task_ids)
        .await?;
    Ok(ApiResponse::done())
}

/// DELETE .../task/{taskId}
pub async fn delete_task(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<TaskPath>,
) -> Result<ApiResponse<()>, BackendError> {
    task_in_todo(&pool, grant.project_id, &path).await?;
    ordering::remove_item::<TodoTasks>(&pool, path.task_id).await?;

    tracing::info!("Deleted task {} from todo {}", path.task_id, path.todo_id);
    Ok(ApiResponse::done())
}
