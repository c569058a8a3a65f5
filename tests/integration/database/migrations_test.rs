//! Database migration tests
//!
//! Tests to ensure migrations run correctly and the schema carries the seed
//! rows and constraints the handlers rely on

use pretty_assertions::assert_eq;

use crate::common::database::{create_test_pool, insert_project, insert_todo, insert_user};
use planhub::backend::server::run_migrations;

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = create_test_pool().await;
    let result = run_migrations(&pool).await;
    assert!(result.is_ok(), "Migrations should run a second time: {result:?}");
}

#[tokio::test]
async fn test_tables_exist() {
    let pool = create_test_pool().await;

    for table in [
        "users",
        "roles",
        "statuts",
        "projects",
        "user_projects",
        "calendar_events",
        "gantts",
        "gantt_activities",
        "gantt_activity_users",
        "gantt_activity_dependencies",
        "todos",
        "todo_tasks",
        "todo_task_users",
        "trellos",
        "trello_lists",
        "trello_cards",
        "trello_card_users",
        "vault_passwords",
    ] {
        let result = sqlx::query(&format!("SELECT 1 FROM {table} LIMIT 1")).execute(&pool).await;
        assert!(result.is_ok(), "{table} table should exist");
    }
}

#[tokio::test]
async fn test_reference_rows_are_seeded() {
    let pool = create_test_pool().await;

    let roles: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(roles, vec![(1, "Admin".to_string()), (2, "Member".to_string())]);

    let statuts: Vec<String> = sqlx::query_scalar("SELECT libelle FROM statuts ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(statuts, vec!["pending", "in_progress", "completed"]);
}

#[tokio::test]
async fn test_email_is_unique() {
    let pool = create_test_pool().await;
    insert_user(&pool, "jane@example.com").await;

    let duplicate = sqlx::query(
        "INSERT INTO users (email, password_hash, name, first_name, created_at) VALUES ($1, 'x', 'x', 'x', 'now')",
    )
    .bind("jane@example.com")
    .execute(&pool)
    .await;
    assert!(duplicate.is_err());
}

#[tokio::test]
async fn test_deleting_a_todo_cascades_to_tasks() {
    let pool = create_test_pool().await;
    let user = insert_user(&pool, "jane@example.com").await;
    let project = insert_project(&pool, user, "Apollo").await;
    let todo = insert_todo(&pool, project).await;
    crate::common::database::insert_tasks(&pool, todo, &["A", "B"]).await;

    sqlx::query("DELETE FROM todos WHERE id = $1").bind(todo).execute(&pool).await.unwrap();

    let left: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM todo_tasks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(left, 0);
}
