/**
 * Gantt Chart Handlers
 *
 * Routes under `/project/{projectId}/gantt`.
 */

use axum::extract::State;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db;
use super::types::{Gantt, GanttSummary, NameRequest};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::{ProjectAdmin, ProjectMember};
use crate::backend::response::ApiResponse;
use crate::shared::required_text;

#[derive(Debug, Deserialize)]
pub struct GanttPath {
    #[serde(rename = "ganttId")]
    pub gantt_id: i64,
}

pub async fn gantt_in_project(
    pool: &SqlitePool,
    project_id: i64,
    gantt_id: i64,
) -> Result<Gantt, BackendError> {
    db::find_gantt(pool, project_id, gantt_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("gantt {gantt_id} not found in this project")))
}

/// GET /project/{projectId}/gantt
pub async fn list_gantts(
    ProjectMember(grant): ProjectMember,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<Vec<GanttSummary>>, BackendError> {
    let gantts = db::list_gantts(&pool, grant.project_id).await?;
    Ok(ApiResponse::ok(gantts))
}

/// POST /project/{projectId}/gantt
pub async fn create_gantt(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Json(request): Json<NameRequest>,
) -> Result<ApiResponse<Gantt>, BackendError> {
    let name = required_text("name", &request.name)?;
    let gantt = db::create_gantt(&pool, grant.project_id, name).await?;

    tracing::info!("Created gantt {} in project {}", gantt.id, grant.project_id);
    Ok(ApiResponse::created(gantt))
}

/// PUT /project/{projectId}/gantt/{ganttId}
pub async fn rename_gantt(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<GanttPath>,
    Json(request): Json<NameRequest>,
) -> Result<ApiResponse<Gantt>, BackendError> {
    let name = required_text("name", &request.name)?;
    gantt_in_project(&pool, grant.project_id, path.gantt_id).await?;

    let gantt = db::rename_gantt(&pool, path.gantt_id, name).await?;
    Ok(ApiResponse::ok(gantt))
}

/// DELETE /project/{projectId}/gantt/{ganttId}
pub async fn delete_gantt(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<GanttPath>,
) -> Result<ApiResponse<()>, BackendError> {
    gantt_in_project(&pool, grant.project_id, path.gantt_id).await?;
    db::delete_gantt(&pool, path.gantt_id).await?;

    tracing::info!("Deleted gantt {} in project {}", path.gantt_id, grant.project_id);
    Ok(ApiResponse::done())
}
