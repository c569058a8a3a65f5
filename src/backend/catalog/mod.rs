//! Reference data
//!
//! Roles and statuses are seeded by the initial migration and never change
//! at runtime. Both lists are public.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::response::ApiResponse;

/// Progress status of a task, card or activity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Statut {
    pub id: i64,
    pub libelle: String,
}

impl Statut {
    pub const PENDING: i64 = 1;
    pub const IN_PROGRESS: i64 = 2;
    pub const COMPLETED: i64 = 3;

    /// Status matching a Gantt progress percentage
    pub fn for_progress(progress: i64) -> i64 {
        match progress {
            p if p <= 0 => Self::PENDING,
            p if p >= 100 => Self::COMPLETED,
            _ => Self::IN_PROGRESS,
        }
    }
}

/// Membership role row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct RoleRow {
    pub id: i64,
    pub name: String,
}

/// GET /role
pub async fn list_roles(State(pool): State<SqlitePool>) -> Result<ApiResponse<Vec<RoleRow>>, BackendError> {
    let roles = sqlx::query_as::<_, RoleRow>("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await?;
    Ok(ApiResponse::ok(roles))
}

/// GET /statut
pub async fn list_statuts(State(pool): State<SqlitePool>) -> Result<ApiResponse<Vec<Statut>>, BackendError> {
    let statuts = sqlx::query_as::<_, Statut>("SELECT id, libelle FROM statuts ORDER BY id")
        .fetch_all(&pool)
        .await?;
    Ok(ApiResponse::ok(statuts))
}
