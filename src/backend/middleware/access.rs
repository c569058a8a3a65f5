/**
 * Project Access Chain
 *
 * Project-scoped routes are guarded by three checks evaluated in a fixed
 * order, stopping at the first failure:
 *
 * 1. token validity (an `AuthenticatedUser` is present)
 * 2. project membership (the `projectId` path segment is a project the user
 *    belongs to)
 * 3. role sufficiency (the membership satisfies the route's `Requirement`)
 *
 * Each step yields a typed `Denial` instead of a boolean, and the HTTP layer
 * maps it to 401 / 403 / 400 without re-deriving why.
 *
 * Handlers opt in with an extractor:
 *
 * ```rust,ignore
 * async fn rename(ProjectAdmin(grant): ProjectAdmin, ...) { ... }
 * ```
 */

use std::collections::HashMap;

use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::auth::AuthenticatedUser;
use crate::backend::server::state::AppState;

/// Why a request was refused before reaching its handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No valid token (401)
    Unauthenticated(&'static str),
    /// Authenticated, but not allowed on this project (403)
    Forbidden(&'static str),
    /// The project reference itself is malformed (400)
    InvalidInput(&'static str),
    /// The check could not be evaluated (500)
    Internal,
}

impl Denial {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<Denial> for BackendError {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthenticated(message) => BackendError::unauthorized(message),
            Denial::Forbidden(message) => BackendError::forbidden(message),
            Denial::InvalidInput(message) => BackendError::validation(message),
            Denial::Internal => BackendError::internal("access check failed"),
        }
    }
}

impl IntoResponse for Denial {
    fn into_response(self) -> Response {
        BackendError::from(self).into_response()
    }
}

/// Role of a user inside a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub const ADMIN_ID: i64 = 1;
    pub const MEMBER_ID: i64 = 2;

    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            Self::ADMIN_ID => Some(Self::Admin),
            Self::MEMBER_ID => Some(Self::Member),
            _ => None,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Self::Admin => Self::ADMIN_ID,
            Self::Member => Self::MEMBER_ID,
        }
    }
}

/// What a route demands of the caller's membership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any role, project not deleted
    Member,
    /// `Admin` role, project not deleted
    Admin,
    /// The user who created the project, deleted or not
    Creator,
}

/// Proof that the chain passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grant {
    pub user_id: i64,
    pub project_id: i64,
    pub role: Role,
    pub is_creator: bool,
}

#[derive(sqlx::FromRow)]
struct Membership {
    role_id: i64,
    creator_id: i64,
    deleted: bool,
}

/// Run the access chain for one request
pub async fn check_chain(
    pool: &SqlitePool,
    user: Option<AuthenticatedUser>,
    raw_project_id: Option<&str>,
    requirement: Requirement,
) -> Result<Grant, Denial> {
    let user = user.ok_or(Denial::Unauthenticated("authentication required"))?;

    let project_id = raw_project_id
        .ok_or(Denial::InvalidInput("projectId is required"))?
        .parse::<i64>()
        .map_err(|_| Denial::InvalidInput("projectId must be an integer"))?;

    let membership = sqlx::query_as::<_, Membership>(
        r#"
        SELECT up.role_id, p.creator_id, p.deleted
        FROM user_projects up
        JOIN projects p ON p.id = up.project_id
        WHERE up.user_id = $1 AND up.project_id = $2
        "#,
    )
    .bind(user.user_id)
    .bind(project_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Membership lookup failed: {:?}", e);
        Denial::Internal
    })?
    .ok_or_else(|| {
        tracing::warn!("User {} is not a member of project {}", user.user_id, project_id);
        Denial::Forbidden("not a member of this project")
    })?;

    let role = Role::from_id(membership.role_id).ok_or(Denial::Internal)?;
    let grant = Grant {
        user_id: user.user_id,
        project_id,
        role,
        is_creator: membership.creator_id == user.user_id,
    };

    match requirement {
        Requirement::Creator if !grant.is_creator => {
            Err(Denial::Forbidden("only the project creator can do this"))
        }
        Requirement::Creator => Ok(grant),
        _ if membership.deleted => Err(Denial::Forbidden("project is deleted")),
        Requirement::Admin if role != Role::Admin => {
            tracing::warn!("User {} lacks Admin on project {}", user.user_id, project_id);
            Err(Denial::Forbidden("admin role required"))
        }
        Requirement::Admin | Requirement::Member => Ok(grant),
    }
}

async fn grant_from_parts(
    parts: &mut Parts,
    state: &AppState,
    requirement: Requirement,
) -> Result<Grant, Denial> {
    let user = parts.extensions.get::<AuthenticatedUser>().copied();
    let params = Path::<HashMap<String, String>>::from_request_parts(parts, state)
        .await
        .map(|Path(params)| params)
        .unwrap_or_default();

    check_chain(
        &state.pool,
        user,
        params.get("projectId").map(String::as_str),
        requirement,
    )
    .await
}

/// Caller is a member of the `projectId` project
#[derive(Debug, Clone, Copy)]
pub struct ProjectMember(pub Grant);

/// Caller is an `Admin` of the `projectId` project
#[derive(Debug, Clone, Copy)]
pub struct ProjectAdmin(pub Grant);

/// Caller created the `projectId` project
#[derive(Debug, Clone, Copy)]
pub struct ProjectCreator(pub Grant);

impl FromRequestParts<AppState> for ProjectMember {
    type Rejection = Denial;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        grant_from_parts(parts, state, Requirement::Member).await.map(Self)
    }
}

impl FromRequestParts<AppState> for ProjectAdmin {
    type Rejection = Denial;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        grant_from_parts(parts, state, Requirement::Admin).await.map(Self)
    }
}

impl FromRequestParts<AppState> for ProjectCreator {
    type Rejection = Denial;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        grant_from_parts(parts, state, Requirement::Creator).await.map(Self)
    }
}
