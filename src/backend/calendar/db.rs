//! Calendar persistence
//!
//! Every query is scoped by `user_id`: an event is invisible to anyone but
//! its owner.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::types::CalendarEvent;

const EVENT_COLUMNS: &str = "id, name, description, date_event, user_id";

/// Events of the user in `[start, end)`, oldest first
pub async fn events_between(
    pool: &SqlitePool,
    user_id: i64,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<CalendarEvent>, sqlx::Error> {
    sqlx::query_as::<_, CalendarEvent>(&format!(
        r#"
        SELECT {EVENT_COLUMNS} FROM calendar_events
        WHERE user_id = $1 AND date_event >= $2 AND date_event < $3
        ORDER BY date_event, id
        "#
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}

pub async fn create_event(
    pool: &SqlitePool,
    user_id: i64,
    name: &str,
    description: Option<&str>,
    date_event: DateTime<Utc>,
) -> Result<CalendarEvent, sqlx::Error> {
    sqlx::query_as::<_, CalendarEvent>(&format!(
        "INSERT INTO calendar_events (name, description, date_event, user_id) VALUES ($1, $2, $3, $4) RETURNING {EVENT_COLUMNS}"
    ))
    .bind(name)
    .bind(description)
    .bind(date_event)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Update an event owned by the user; `None` when there is no such event
pub async fn update_event(
    pool: &SqlitePool,
    user_id: i64,
    event_id: i64,
    name: Option<&str>,
    description: Option<&str>,
    date_event: Option<DateTime<Utc>>,
) -> Result<Option<CalendarEvent>, sqlx::Error> {
    sqlx::query_as::<_, CalendarEvent>(&format!(
        r#"
        UPDATE calendar_events
        SET name = COALESCE($1, name),
            description = COALESCE($2, description),
            date_event = COALESCE($3, date_event)
        WHERE id = $4 AND user_id = $5
        RETURNING {EVENT_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(description)
    .bind(date_event)
    .bind(event_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was deleted
pub async fn delete_event(pool: &SqlitePool, user_id: i64, event_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1 AND user_id = $2")
        .bind(event_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
