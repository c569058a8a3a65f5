//! Projects and memberships
//!
//! A project groups Gantt charts, to-dos and boards. Every member has one
//! role (`Admin` or `Member`); the creator starts as `Admin` and is the only
//! one who can delete or restore the project.

pub mod db;
pub mod handlers;
pub mod types;

pub use types::Project;

use sqlx::SqlitePool;

use crate::backend::error::BackendError;

/// Fail with a validation error unless every id is a member of the project
pub async fn ensure_members(
    pool: &SqlitePool,
    project_id: i64,
    user_ids: &[i64],
) -> Result<(), BackendError> {
    let mut wanted = user_ids.to_vec();
    wanted.sort_unstable();
    wanted.dedup();

    let found = db::members_among(pool, project_id, &wanted).await?;
    if found.len() != wanted.len() {
        let missing: Vec<String> = wanted
            .iter()
            .filter(|id| !found.contains(id))
            .map(i64::to_string)
            .collect();
        return Err(BackendError::validation(format!(
            "users {} are not members of this project",
            missing.join(", ")
        )));
    }
    Ok(())
}
