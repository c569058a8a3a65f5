//! Gantt persistence

use std::collections::HashMap;

use sqlx::{QueryBuilder, Sqlite, SqlitePool, Transaction};

use super::types::{Activity, ActivityChanges, ChartTask, Gantt, GanttSummary, NewActivity};
use crate::backend::catalog::Statut;

const ACTIVITY_COLUMNS: &str =
    "id, name, description, start_date, end_date, progress, statut_id, gantt_id";

pub async fn list_gantts(pool: &SqlitePool, project_id: i64) -> Result<Vec<GanttSummary>, sqlx::Error> {
    sqlx::query_as::<_, GanttSummary>(
        r#"
        SELECT g.id, g.name, g.project_id,
               COUNT(CASE WHEN a.statut_id = $2 THEN 1 END) AS activity_completed,
               COUNT(a.id) AS activity_global
        FROM gantts g
        LEFT JOIN gantt_activities a ON a.gantt_id = g.id
        WHERE g.project_id = $1
        GROUP BY g.id
        ORDER BY g.id
        "#,
    )
    .bind(project_id)
    .bind(Statut::COMPLETED)
    .fetch_all(pool)
    .await
}

/// The chart, if it belongs to the project
pub async fn find_gantt(
    pool: &SqlitePool,
    project_id: i64,
    gantt_id: i64,
) -> Result<Option<Gantt>, sqlx::Error> {
    sqlx::query_as::<_, Gantt>("SELECT id, name, project_id FROM gantts WHERE id = $1 AND project_id = $2")
        .bind(gantt_id)
        .bind(project_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_gantt(pool: &SqlitePool, project_id: i64, name: &str) -> Result<Gantt, sqlx::Error> {
    sqlx::query_as::<_, Gantt>(
        "INSERT INTO gantts (name, project_id) VALUES ($1, $2) RETURNING id, name, project_id",
    )
    .bind(name)
    .bind(project_id)
    .fetch_one(pool)
    .await
}

pub async fn rename_gantt(pool: &SqlitePool, gantt_id: i64, name: &str) -> Result<Gantt, sqlx::Error> {
    sqlx::query_as::<_, Gantt>("UPDATE gantts SET name = $1 WHERE id = $2 RETURNING id, name, project_id")
        .bind(name)
        .bind(gantt_id)
        .fetch_one(pool)
        .await
}

pub async fn delete_gantt(pool: &SqlitePool, gantt_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM gantts WHERE id = $1")
        .bind(gantt_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Every activity of the chart with its dependency ids and assignee names
pub async fn chart_tasks(pool: &SqlitePool, gantt_id: i64) -> Result<Vec<ChartTask>, sqlx::Error> {
    let activities = sqlx::query_as::<_, Activity>(&format!(
        "SELECT {ACTIVITY_COLUMNS} FROM gantt_activities WHERE gantt_id = $1 ORDER BY start_date, id"
    ))
    .bind(gantt_id)
    .fetch_all(pool)
    .await?;

    let dependencies: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT d.activity_id, d.depends_on_id
        FROM gantt_activity_dependencies d
        JOIN gantt_activities a ON a.id = d.activity_id
        WHERE a.gantt_id = $1
        ORDER BY d.depends_on_id
        "#,
    )
    .bind(gantt_id)
    .fetch_all(pool)
    .await?;

    let users: Vec<(i64, String)> = sqlx::query_as(
        r#"
        SELECT au.activity_id, u.name
        FROM gantt_activity_users au
        JOIN gantt_activities a ON a.id = au.activity_id
        JOIN users u ON u.id = au.user_id
        WHERE a.gantt_id = $1
        ORDER BY u.id
        "#,
    )
    .bind(gantt_id)
    .fetch_all(pool)
    .await?;

    let mut depends_on: HashMap<i64, Vec<String>> = HashMap::new();
    for (activity_id, dependency_id) in dependencies {
        depends_on.entry(activity_id).or_default().push(dependency_id.to_string());
    }
    let mut names: HashMap<i64, Vec<String>> = HashMap::new();
    for (activity_id, name) in users {
        names.entry(activity_id).or_default().push(name);
    }

    Ok(activities
        .into_iter()
        .map(|activity| ChartTask {
            id: activity.id.to_string(),
            dependencies: depends_on.remove(&activity.id).unwrap_or_default().join(","),
            users: names.remove(&activity.id).unwrap_or_default(),
            name: activity.name,
            start: activity.start_date,
            end: activity.end_date,
            progress: activity.progress,
        })
        .collect())
}

/// The activity, if it belongs to the chart
pub async fn find_activity(
    pool: &SqlitePool,
    gantt_id: i64,
    activity_id: i64,
) -> Result<Option<Activity>, sqlx::Error> {
    sqlx::query_as::<_, Activity>(&format!(
        "SELECT {ACTIVITY_COLUMNS} FROM gantt_activities WHERE id = $1 AND gantt_id = $2"
    ))
    .bind(activity_id)
    .bind(gantt_id)
    .fetch_optional(pool)
    .await
}

/// Subset of `activity_ids` that are activities of the chart
pub async fn activities_among(
    pool: &SqlitePool,
    gantt_id: i64,
    activity_ids: &[i64],
) -> Result<Vec<i64>, sqlx::Error> {
    if activity_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut query: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT id FROM gantt_activities WHERE gantt_id = ");
    query.push_bind(gantt_id).push(" AND id IN (");
    let mut ids = query.separated(", ");
    for id in activity_ids {
        ids.push_bind(*id);
    }
    ids.push_unseparated(")");

    query.build_query_scalar().fetch_all(pool).await
}

pub async fn create_activity(
    pool: &SqlitePool,
    gantt_id: i64,
    activity: &NewActivity<'_>,
) -> Result<Activity, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, Activity>(&format!(
        r#"
        INSERT INTO gantt_activities (name, description, start_date, end_date, progress, statut_id, gantt_id)
        VALUES ($1, $2, $3, $4, 0, $5, $6)
        RETURNING {ACTIVITY_COLUMNS}
        "#
    ))
    .bind(activity.name)
    .bind(activity.description)
    .bind(activity.start_date)
    .bind(activity.end_date)
    .bind(Statut::PENDING)
    .bind(gantt_id)
    .fetch_one(&mut *tx)
    .await?;

    link_users(&mut tx, created.id, activity.user_ids).await?;
    link_dependencies(&mut tx, created.id, activity.dependency_ids).await?;

    tx.commit().await?;
    Ok(created)
}

pub async fn update_activity(
    pool: &SqlitePool,
    activity_id: i64,
    changes: &ActivityChanges<'_>,
) -> Result<Activity, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query_as::<_, Activity>(&format!(
        r#"
        UPDATE gantt_activities
        SET name = COALESCE($1, name),
            description = COALESCE($2, description),
            start_date = COALESCE($3, start_date),
            end_date = COALESCE($4, end_date),
            progress = COALESCE($5, progress),
            statut_id = COALESCE($6, statut_id)
        WHERE id = $7
        RETURNING {ACTIVITY_COLUMNS}
        "#
    ))
    .bind(changes.name)
    .bind(changes.description)
    .bind(changes.start_date)
    .bind(changes.end_date)
    .bind(changes.progress)
    .bind(changes.statut_id)
    .bind(activity_id)
    .fetch_one(&mut *tx)
    .await?;

    if let Some(user_ids) = changes.user_ids {
        sqlx::query("DELETE FROM gantt_activity_users WHERE activity_id = $1")
            .bind(activity_id)
            .execute(&mut *tx)
            .await?;
        link_users(&mut tx, activity_id, user_ids).await?;
    }
    if let Some(dependency_ids) = changes.dependency_ids {
        sqlx::query("DELETE FROM gantt_activity_dependencies WHERE activity_id = $1")
            .bind(activity_id)
            .execute(&mut *tx)
            .await?;
        link_dependencies(&mut tx, activity_id, dependency_ids).await?;
    }

    tx.commit().await?;
    Ok(updated)
}

/// Delete the activity together with every link pointing at it
pub async fn delete_activity(pool: &SqlitePool, activity_id: i64) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM gantt_activity_users WHERE activity_id = $1")
        .bind(activity_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM gantt_activity_dependencies WHERE activity_id = $1 OR depends_on_id = $1")
        .bind(activity_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM gantt_activities WHERE id = $1")
        .bind(activity_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

async fn link_users(
    tx: &mut Transaction<'_, Sqlite>,
    activity_id: i64,
    user_ids: &[i64],
) -> Result<(), sqlx::Error> {
    for user_id in user_ids {
        sqlx::query("INSERT OR IGNORE INTO gantt_activity_users (activity_id, user_id) VALUES ($1, $2)")
            .bind(activity_id)
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

async fn link_dependencies(
    tx: &mut Transaction<'_, Sqlite>,
    activity_id: i64,
    dependency_ids: &[i64],
) -> Result<(), sqlx::Error> {
    for dependency_id in dependency_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO gantt_activity_dependencies (activity_id, depends_on_id) VALUES ($1, $2)",
        )
        .bind(activity_id)
        .bind(dependency_id)
        .execute(&mut **tx)
        .await?;
    }
    Ok(())
}
