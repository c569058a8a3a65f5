/**
 * Project Handlers
 *
 * Projects are soft-deleted: `DELETE` only flags the row, the creator can
 * list flagged projects under `/project/del` and restore them.
 */

use axum::extract::State;
use sqlx::SqlitePool;

use super::db;
use super::types::{CreateProjectRequest, PeopleRequest, Project, UpdateProjectRequest};
use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::extract::Json;
use crate::backend::middleware::{AuthUser, ProjectAdmin, ProjectCreator, ProjectMember, Role};
use crate::backend::response::ApiResponse;
use crate::shared::required_text;

const RECENT_LIMIT: i64 = 4;

/// GET /project
pub async fn list_projects(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<Vec<Project>>, BackendError> {
    let projects = db::list_member_projects(&pool, user.user_id, None).await?;
    Ok(ApiResponse::ok(projects))
}

/// GET /project/recent
pub async fn list_recent_projects(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<Vec<Project>>, BackendError> {
    let projects = db::list_member_projects(&pool, user.user_id, Some(RECENT_LIMIT)).await?;
    Ok(ApiResponse::ok(projects))
}

/// GET /project/del
pub async fn list_deleted_projects(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<Vec<Project>>, BackendError> {
    let projects = db::list_deleted_projects(&pool, user.user_id).await?;
    Ok(ApiResponse::ok(projects))
}

/// POST /project
pub async fn create_project(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<ApiResponse<Project>, BackendError> {
    let name = required_text("name", &request.name)?;
    let project =
        db::create_project(&pool, user.user_id, name, request.description.as_deref()).await?;

    tracing::info!("User {} created project {}", user.user_id, project.id);
    Ok(ApiResponse::created(project))
}

/// PUT /project/{projectId}
pub async fn update_project(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<ApiResponse<Project>, BackendError> {
    if request.name.is_none() && request.description.is_none() {
        return Err(BackendError::validation("nothing to update"));
    }
    let name = request.name.as_deref().map(|name| required_text("name", name)).transpose()?;

    let project =
        db::update_project(&pool, grant.project_id, name, request.description.as_deref()).await?;
    Ok(ApiResponse::ok(project))
}

/// POST /project/addPeople/{projectId}
pub async fn add_people(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Json(request): Json<PeopleRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    let role = parse_role(request.role_id)?;
    get_user_by_id(&pool, request.people_id)
        .await?
        .ok_or_else(|| BackendError::not_found(format!("user {} not found", request.people_id)))?;

    db::add_member(&pool, grant.project_id, request.people_id, role)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                BackendError::conflict("user is already a member of this project")
            }
            other => other.into(),
        })?;

    tracing::info!(
        "User {} added user {} to project {} as {:?}",
        grant.user_id,
        request.people_id,
        grant.project_id,
        role
    );
    Ok(ApiResponse::done())
}

/// PUT /project/updatePeople/{projectId}
pub async fn update_people(
    ProjectAdmin(grant): ProjectAdmin,
    State(pool): State<SqlitePool>,
    Json(request): Json<PeopleRequest>,
) -> Result<ApiResponse<()>, BackendError> {
    let role = parse_role(request.role_id)?;

    let creator_id: i64 = sqlx::query_scalar("SELECT creator_id FROM projects WHERE id = $1")
        .bind(grant.project_id)
        .fetch_one(&pool)
        .await?;
    if creator_id == request.people_id && role != Role::Admin {
        return Err(BackendError::validation("the project creator must stay Admin"));
    }

    if !db::update_member_role(&pool, grant.project_id, request.people_id, role).await? {
        return Err(BackendError::not_found("user is not a member of this project"));
    }
    Ok(ApiResponse::done())
}

/// PUT /project/leave/{projectId}
pub async fn leave_project(
    ProjectMember(grant): ProjectMember,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<()>, BackendError> {
    if grant.is_creator {
        return Err(BackendError::forbidden("the project creator cannot leave it"));
    }

    db::remove_member(&pool, grant.project_id, grant.user_id).await?;
    tracing::info!("User {} left project {}", grant.user_id, grant.project_id);
    Ok(ApiResponse::done())
}

/// PUT /project/restore/{projectId}
pub async fn restore_project(
    ProjectCreator(grant): ProjectCreator,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<()>, BackendError> {
    db::set_deleted(&pool, grant.project_id, false).await?;
    tracing::info!("Project {} restored", grant.project_id);
    Ok(ApiResponse::done())
}

/// DELETE /project/{projectId}
pub async fn delete_project(
    ProjectCreator(grant): ProjectCreator,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<()>, BackendError> {
    db::set_deleted(&pool, grant.project_id, true).await?;
    tracing::info!("Project {} deleted", grant.project_id);
    Ok(ApiResponse::done())
}

fn parse_role(role_id: i64) -> Result<Role, BackendError> {
    Role::from_id(role_id).ok_or_else(|| BackendError::validation(format!("unknown role {role_id}")))
}
