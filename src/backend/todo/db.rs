//! To-do and task persistence

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::types::{Task, Todo, TodoSummary};
use crate::backend::catalog::Statut;
use crate::backend::ordering::{self, TodoTasks};

const TASK_COLUMNS: &str =
    "t.id, t.name, t.position, t.todo_id, t.realised, t.statut_id, t.realisator_id, t.real_date";

pub async fn list_todos(pool: &SqlitePool, project_id: i64) -> Result<Vec<TodoSummary>, sqlx::Error> {
    sqlx::query_as::<_, TodoSummary>(
        r#"
        SELECT d.id, d.name, d.project_id,
               COUNT(CASE WHEN t.statut_id = $2 THEN 1 END) AS task_completed,
               COUNT(t.id) AS task_global
        FROM todos d
        LEFT JOIN todo_tasks t ON t.todo_id = d.id
        WHERE d.project_id = $1
        GROUP BY d.id
        ORDER BY d.id
        "#,
    )
    .bind(project_id)
    .bind(Statut::COMPLETED)
    .fetch_all(pool)
    .await
}

/// The to-do, if it belongs to the project
pub async fn find_todo(
    pool: &SqlitePool,
    project_id: i64,
    todo_id: i64,
) -> Result<Option<Todo>, sqlx::Error> {
    sqlx::query_as::<_, Todo>("SELECT id, name, project_id FROM todos WHERE id = $1 AND project_id = $2")
        .bind(todo_id)
        .bind(project_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_todo(pool: &SqlitePool, project_id: i64, name: &str) -> Result<Todo, sqlx::Error> {
    sqlx::query_as::<_, Todo>(
        "INSERT INTO todos (name, project_id) VALUES ($1, $2) RETURNING id, name, project_id",
    )
    .bind(name)
    .bind(project_id)
    .fetch_one(pool)
    .await
}

pub async fn rename_todo(pool: &SqlitePool, todo_id: i64, name: &str) -> Result<Todo, sqlx::Error> {
    sqlx::query_as::<_, Todo>("UPDATE todos SET name = $1 WHERE id = $2 RETURNING id, name, project_id")
        .bind(name)
        .bind(todo_id)
        .fetch_one(pool)
        .await
}

pub async fn delete_todo(pool: &SqlitePool, todo_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM todos WHERE id = $1")
        .bind(todo_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Tasks of a to-do, filtered on `realised`, in position order
pub async fn list_tasks(
    pool: &SqlitePool,
    todo_id: i64,
    realised: bool,
) -> Result<Vec<Task>, sqlx::Error> {
    let mut tasks = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM todo_tasks t WHERE t.todo_id = $1 AND t.realised = $2 ORDER BY t.position"
    ))
    .bind(todo_id)
    .bind(realised)
    .fetch_all(pool)
    .await?;

    let links: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT tu.task_id, tu.user_id
        FROM todo_task_users tu
        JOIN todo_tasks t ON t.id = tu.task_id
        WHERE t.todo_id = $1
        ORDER BY tu.user_id
        "#,
    )
    .bind(todo_id)
    .fetch_all(pool)
    .await?;

    let mut assignees: HashMap<i64, Vec<i64>> = HashMap::new();
    for (task_id, user_id) in links {
        assignees.entry(task_id).or_default().push(user_id);
    }
    for task in &mut tasks {
        task.user_ids = assignees.remove(&task.id).unwrap_or_default();
    }
    Ok(tasks)
}

/// The task, if it belongs to the to-do
pub async fn find_task(
    pool: &SqlitePool,
    todo_id: i64,
    task_id: i64,
) -> Result<Option<Task>, sqlx::Error> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "SELECT {TASK_COLUMNS} FROM todo_tasks t WHERE t.id = $1 AND t.todo_id = $2"
    ))
    .bind(task_id)
    .bind(todo_id)
    .fetch_optional(pool)
    .await?;

    match task {
        Some(mut task) => {
            task.user_ids = task_user_ids(pool, task.id).await?;
            Ok(Some(task))
        }
        None => Ok(None),
    }
}

async fn task_user_ids(pool: &SqlitePool, task_id: i64) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT user_id FROM todo_task_users WHERE task_id = $1 ORDER BY user_id")
        .bind(task_id)
        .fetch_all(pool)
        .await
}

/// Append a task at the end of the to-do together with its assignees
pub async fn create_task(
    pool: &SqlitePool,
    todo_id: i64,
    name: &str,
    real_date: Option<NaiveDate>,
    user_ids: &[i64],
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let task_id: i64 = sqlx::query_scalar(&format!(
        "INSERT INTO todo_tasks (name, todo_id, real_date, position) VALUES ($1, $2, $3, {}) RETURNING id",
        ordering::next_position_expr::<TodoTasks>(2)
    ))
    .bind(name)
    .bind(todo_id)
    .bind(real_date)
    .fetch_one(&mut *tx)
    .await?;

    for user_id in user_ids {
        sqlx::query("INSERT OR IGNORE INTO todo_task_users (task_id, user_id) VALUES ($1, $2)")
            .bind(task_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(task_id)
}

pub async fn update_task(
    pool: &SqlitePool,
    task_id: i64,
    name: Option<&str>,
    real_date: Option<NaiveDate>,
    user_ids: Option<&[i64]>,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE todo_tasks SET name = COALESCE($1, name), real_date = COALESCE($2, real_date) WHERE id = $3",
    )
    .bind(name)
    .bind(real_date)
    .bind(task_id)
    .execute(&mut *tx)
    .await?;

    if let Some(user_ids) = user_ids {
        sqlx::query("DELETE FROM todo_task_users WHERE task_id = $1")
            .bind(task_id)
            .execute(&mut *tx)
            .await?;
        for user_id in user_ids {
            sqlx::query("INSERT OR IGNORE INTO todo_task_users (task_id, user_id) VALUES ($1, $2)")
                .bind(task_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}

/// Mark completed by `realisator_id`; the completion day defaults to `today`
pub async fn mark_task_realised(
    pool: &SqlitePool,
    task_id: i64,
    realisator_id: i64,
    today: NaiveDate,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE todo_tasks
        SET realised = 1, statut_id = $1, realisator_id = $2, real_date = COALESCE(real_date, $3)
        WHERE id = $4
        "#,
    )
    .bind(Statut::COMPLETED)
    .bind(realisator_id)
    .bind(today)
    .bind(task_id)
    .execute(pool)
    .await?;
    Ok(())
}
