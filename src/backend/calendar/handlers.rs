/**
 * Calendar Handlers
 *
 * Routes under `/calendar`. Event dates accept RFC 3339 timestamps or a bare
 * `YYYY-MM-DD` day (midnight UTC). Another user's event answers 404.
 */

use axum::extract::State;
use serde::Deserialize;
use sqlx::SqlitePool;

use super::db;
use super::types::{CalendarEvent, CreateEventRequest, UpdateEventRequest};
use crate::backend::error::BackendError;
use crate::backend::extract::{Json, Path};
use crate::backend::middleware::AuthUser;
use crate::backend::response::ApiResponse;
use crate::shared::{month_bounds, parse_event_date, required_text, week_bounds};

#[derive(Debug, Deserialize)]
pub struct MonthPath {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Deserialize)]
pub struct EventPath {
    #[serde(rename = "eventId")]
    pub event_id: i64,
}

fn event_not_found(event_id: i64) -> BackendError {
    BackendError::not_found(format!("event {event_id} not found"))
}

/// GET /calendar/accueil/{month}/{year}
pub async fn month_events(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Path(path): Path<MonthPath>,
) -> Result<ApiResponse<Vec<CalendarEvent>>, BackendError> {
    let (start, end) = month_bounds(path.year, path.month)?;
    let events = db::events_between(&pool, user.user_id, start, end).await?;
    Ok(ApiResponse::ok(events))
}

/// GET /calendar/week/{day}
pub async fn week_events(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Path(day): Path<String>,
) -> Result<ApiResponse<Vec<CalendarEvent>>, BackendError> {
    let day = parse_event_date(&day)?.date_naive();
    let (start, end) = week_bounds(day);
    let events = db::events_between(&pool, user.user_id, start, end).await?;
    Ok(ApiResponse::ok(events))
}

/// POST /calendar
pub async fn create_event(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Json(request): Json<CreateEventRequest>,
) -> Result<ApiResponse<CalendarEvent>, BackendError> {
    let name = required_text("name", &request.name)?;
    let date_event = parse_event_date(request.date_event.trim())?;

    let event =
        db::create_event(&pool, user.user_id, name, request.description.as_deref(), date_event).await?;
    tracing::debug!("User {} created event {}", user.user_id, event.id);
    Ok(ApiResponse::created(event))
}

/// PUT /calendar/{eventId}
pub async fn update_event(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Path(path): Path<EventPath>,
    Json(request): Json<UpdateEventRequest>,
) -> Result<ApiResponse<CalendarEvent>, BackendError> {
    if request.name.is_none() && request.description.is_none() && request.date_event.is_none() {
        return Err(BackendError::validation("nothing to update"));
    }
    let name = request.name.as_deref().map(|name| required_text("name", name)).transpose()?;
    let date_event = request
        .date_event
        .as_deref()
        .map(|date| parse_event_date(date.trim()))
        .transpose()?;

    let event = db::update_event(
        &pool,
        user.user_id,
        path.event_id,
        name,
        request.description.as_deref(),
        date_event,
    )
    .await?
    .ok_or_else(|| event_not_found(path.event_id))?;
    Ok(ApiResponse::ok(event))
}

/// DELETE /calendar/{eventId}
pub async fn delete_event(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Path(path): Path<EventPath>,
) -> Result<ApiResponse<()>, BackendError> {
    if !db::delete_event(&pool, user.user_id, path.event_id).await? {
        return Err(event_not_found(path.event_id));
    }
    Ok(ApiResponse::done())
}
