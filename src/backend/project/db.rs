//! Project persistence

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::types::Project;
use crate::backend::middleware::Role;

const PROJECT_COLUMNS: &str = "p.id, p.name, p.description, p.creator_id, p.deleted";

/// Live projects the user belongs to, newest first, at most `limit`
pub async fn list_member_projects(
    pool: &SqlitePool,
    user_id: i64,
    limit: Option<i64>,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!(
        r#"
        SELECT {PROJECT_COLUMNS}
        FROM projects p
        JOIN user_projects up ON up.project_id = p.id
        WHERE up.user_id = $1 AND p.deleted = 0
        ORDER BY p.id DESC
        LIMIT COALESCE($2, -1)
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Soft-deleted projects created by the user
pub async fn list_deleted_projects(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!(
        "SELECT {PROJECT_COLUMNS} FROM projects p WHERE p.creator_id = $1 AND p.deleted = 1 ORDER BY p.id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Create a project and make its creator an `Admin` member, atomically
pub async fn create_project(
    pool: &SqlitePool,
    creator_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<Project, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let project = sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (name, description, creator_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, description, creator_id, deleted
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(creator_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO user_projects (user_id, project_id, role_id) VALUES ($1, $2, $3)")
        .bind(creator_id)
        .bind(project.id)
        .bind(Role::Admin.id())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(project)
}

pub async fn update_project(
    pool: &SqlitePool,
    project_id: i64,
    name: Option<&str>,
    description: Option<&str>,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET name = COALESCE($1, name), description = COALESCE($2, description)
        WHERE id = $3
        RETURNING id, name, description, creator_id, deleted
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(project_id)
    .fetch_one(pool)
    .await
}

pub async fn set_deleted(
    pool: &SqlitePool,
    project_id: i64,
    deleted: bool,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE projects SET deleted = $1 WHERE id = $2")
        .bind(deleted)
        .bind(project_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn add_member(
    pool: &SqlitePool,
    project_id: i64,
    user_id: i64,
    role: Role,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO user_projects (user_id, project_id, role_id) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(project_id)
        .bind(role.id())
        .execute(pool)
        .await?;
    Ok(())
}

/// Change a member's role; `false` when the user is not a member
pub async fn update_member_role(
    pool: &SqlitePool,
    project_id: i64,
    user_id: i64,
    role: Role,
) -> Result<bool, sqlx::Error> {
    let result =
        sqlx::query("UPDATE user_projects SET role_id = $1 WHERE project_id = $2 AND user_id = $3")
            .bind(role.id())
            .bind(project_id)
            .bind(user_id)
            .execute(pool)
            .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn remove_member(
    pool: &SqlitePool,
    project_id: i64,
    user_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM user_projects WHERE project_id = $1 AND user_id = $2")
        .bind(project_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// The subset of `user_ids` that are members of the project
pub async fn members_among(
    pool: &SqlitePool,
    project_id: i64,
    user_ids: &[i64],
) -> Result<Vec<i64>, sqlx::Error> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT user_id FROM user_projects WHERE project_id = ");
    query.push_bind(project_id).push(" AND user_id IN (");
    let mut ids = query.separated(", ");
    for id in user_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(")");

    query.build_query_scalar().fetch_all(pool).await
}
