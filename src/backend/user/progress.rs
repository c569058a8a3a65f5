/**
 * Progress Report
 *
 * `GET /user/progressed` counts completed work assigned to the caller, per
 * `YYYY-MM` month: cards and tasks by their completion day, Gantt activities
 * by their start day. Tasks completed without a day are skipped.
 */

use std::collections::BTreeMap;

use axum::extract::State;
use sqlx::SqlitePool;

use crate::backend::catalog::Statut;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::response::ApiResponse;

const CARDS_PER_MONTH: &str = r#"
    SELECT substr(c.real_date, 1, 7) AS month, COUNT(*) AS total
    FROM trello_cards c
    JOIN trello_card_users cu ON cu.card_id = c.id
    WHERE cu.user_id = $1 AND c.statut_id = $2
    GROUP BY month
"#;

const TASKS_PER_MONTH: &str = r#"
    SELECT substr(t.real_date, 1, 7) AS month, COUNT(*) AS total
    FROM todo_tasks t
    JOIN todo_task_users tu ON tu.task_id = t.id
    WHERE tu.user_id = $1 AND t.statut_id = $2 AND t.real_date IS NOT NULL
    GROUP BY month
"#;

const ACTIVITIES_PER_MONTH: &str = r#"
    SELECT substr(a.start_date, 1, 7) AS month, COUNT(*) AS total
    FROM gantt_activities a
    JOIN gantt_activity_users au ON au.activity_id = a.id
    WHERE au.user_id = $1 AND a.statut_id = $2
    GROUP BY month
"#;

async fn per_month(pool: &SqlitePool, sql: &str, user_id: i64) -> Result<Vec<(String, i64)>, sqlx::Error> {
    sqlx::query_as(sql)
        .bind(user_id)
        .bind(Statut::COMPLETED)
        .fetch_all(pool)
        .await
}

/// Completed items per month, months in ascending order
pub async fn monthly_progress(pool: &SqlitePool, user_id: i64) -> Result<BTreeMap<String, i64>, sqlx::Error> {
    let (cards, tasks, activities) = futures_util::try_join!(
        per_month(pool, CARDS_PER_MONTH, user_id),
        per_month(pool, TASKS_PER_MONTH, user_id),
        per_month(pool, ACTIVITIES_PER_MONTH, user_id),
    )?;

    let mut months = BTreeMap::new();
    for (month, total) in cards.into_iter().chain(tasks).chain(activities) {
        *months.entry(month).or_insert(0) += total;
    }
    Ok(months)
}

/// GET /user/progressed
pub async fn progressed(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
) -> Result<ApiResponse<BTreeMap<String, i64>>, BackendError> {
    let months = monthly_progress(&pool, user.user_id).await?;
    Ok(ApiResponse::ok(months))
}
