/**
 * Gantt Activity Handlers
 *
 * Routes under `/project/{projectId}/gantt/{ganttId}/activity`.
 *
 * Dates are strict `YYYY-MM-DD` days and the start may not fall after the
 * end. On update the check runs against the stored date for whichever bound
 * is not being changed. Progress is clamped to `0..=100` and drives the
 * status: 0 is pending, 100 is completed, anything between is in progress.
 */

use axum::extract::State;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db;
use super::handlers::{gantt_in_project, GanttPath};
use super::types::{
    Activity, ActivityChanges, ChartTask, CreateActivityRequest, NewActivity, UpdateActivityRequest,
};
use crate::backend::catalog::Statut;
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::{ProjectAdmin, ProjectMember};
use crate::backend::project::ensure_members;
use crate::backend::response::ApiResponse;
use crate::shared::{parse_strict_date, required_text};

#[derive(Debug, Deserialize)]
pub struct ActivityPath {
    #[serde(rename = "ganttId")]
    pub gantt_id: i64,
    #[serde(rename = "activityId")]
    pub activity_id: i64,
}

async fn activity_in_gantt(
    pool: &SqlitePool,
    project_id: i64,
    path: &ActivityPath,
) -> Result<Activity, BackendError> {
    gantt_in_project(pool, project_id, path.gantt_id).await?;
    db::find_activity(pool, path.gantt_id, path.activity_id)
        .await?
        .ok_or_else(|| {
            BackendError::not_found(format!("activity {} not found in this gantt", path.activity_id))
        })
}

/// Dependencies must be other activities of the same chart
async fn ensure_dependencies(
    pool: &SqlitePool,
    gantt_id: i64,
    activity_id: Option<i64>,
    dependency_ids: &[i64],
) -> Result<(), BackendError> {
    if activity_id.is_some_and(|id| dependency_ids.contains(&id)) {
        return Err(BackendError::validation("an activity cannot depend on itself"));
    }

    let mut wanted = dependency_ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();
    let found = db::activities_among(pool, gantt_id, &wanted).await?;
    if found.len() != wanted.len() {
        return Err(BackendError::validation("dependencies must be activities of this gantt"));
    }
    Ok(())
}

/// GET .../activity
pub async fn list_activities(
    ProjectMember(grant): ProjectMember,
    State(pool): State<SqlitePool>,
    Path(path): Path<GanttPath>,
) -> Result<ApiResponse<Vec<ChartTask>>, BackendError> {
    gantt_in_project(&pool, grant.project_id, path.gantt_id).await?;
    let tasks = db::chart_tasks(&pool, path.gantt_id).await?;
    Ok(ApiResponse::ok(tasks))
}

/// POST .../activity
pub async fn create_activity(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<GanttPath>,
    Json(request): Json<CreateActivityRequest>,
) -> Result<ApiResponse<Activity>, BackendError> {
    let name = required_text("name", &request.name)?;
    let description = required_text("description", &request.description)?;
    let start_date = parse_strict_date(request.start_date.trim())?;
    let end_date = parse_strict_date(request.end_date.trim())?;
    if start_date > end_date {
        return Err(BackendError::validation("startDate must not be after endDate"));
    }

    gantt_in_project(&pool, grant.project_id, path.gantt_id).await?;
    ensure_members(&pool, grant.project_id, &request.user_ids).await?;
    ensure_dependencies(&pool, path.gantt_id, None, &request.dependency_ids).await?;

    let activity = db::create_activity(
        &pool,
        path.gantt_id,
        &NewActivity {
            name,
            description,
            start_date,
            end_date,
            user_ids: &request.user_ids,
            dependency_ids: &request.dependency_ids,
        },
    )
    .await?;

    tracing::info!("Created activity {} in gantt {}", activity.id, path.gantt_id);
    Ok(ApiResponse::created(activity))
}

/// PUT .../activity/{activityId}
pub async fn update_activity(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<ActivityPath>,
    Json(request): Json<UpdateActivityRequest>,
) -> Result<ApiResponse<Activity>, BackendError> {
    if request.is_empty() {
        return Err(BackendError::validation("nothing to update"));
    }
    let name = request.name.as_deref().map(|name| required_text("name", name)).transpose()?;
    let description = request
        .description
        .as_deref()
        .map(|description| required_text("description", description))
        .transpose()?;
    let start_date = request.start_date.as_deref().map(parse_strict_date).transpose()?;
    let end_date = request.end_date.as_deref().map(parse_strict_date).transpose()?;
    let progress = request.progress.map(|p| p.clamp(0, 100));

    let current = activity_in_gantt(&pool, grant.project_id, &path).await?;
    if start_date.unwrap_or(current.start_date) > end_date.unwrap_or(current.end_date) {
        return Err(BackendError::validation("startDate must not be after endDate"));
    }
    if let Some(user_ids) = &request.user_ids {
        ensure_members(&pool, grant.project_id, user_ids).await?;
    }
    if let Some(dependency_ids) = &request.dependency_ids {
        ensure_dependencies(&pool, path.gantt_id, Some(path.activity_id), dependency_ids).await?;
    }

    let changes = ActivityChanges {
        name,
        description,
        start_date,
        end_date,
        progress,
        statut_id: progress.map(Statut::for_progress),
        user_ids: request.user_ids.as_deref(),
        dependency_ids: request.dependency_ids.as_deref(),
    };
    let activity = db::update_activity(&pool, path.activity_id, &changes).await?;
    Ok(ApiResponse::ok(activity))
}

/// DELETE .../activity/{activityId}
pub async fn delete_activity(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Path(path): Path<ActivityPath>,
) -> Result<ApiResponse<()>, BackendError> {
    activity_in_gantt(&pool, grant.project_id, &path).await?;
    db::delete_activity(&pool, path.activity_id).await?;

    tracing::info!("Deleted activity {} from gantt {}", path.activity_id, path.gantt_id);
    Ok(ApiResponse::done())
}
