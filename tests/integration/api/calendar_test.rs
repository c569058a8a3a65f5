//! Personal calendar events

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::assertions::expect_data;
use crate::common::{TestApp, TestUser};

async fn add_event(app: &TestApp, user: &TestUser, name: &str, date: &str) -> Value {
    let response = app
        .server
        .post("/calendar")
        .authorization_bearer(&user.token)
        .json(&json!({"name": name, "dateEvent": date}))
        .await;
    expect_data(&response, StatusCode::CREATED)
}

fn names(events: &Value) -> Vec<&str> {
    events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_month_view_is_half_open() {
    let app = TestApp::new().await;
    let user = app.create_user("jane@example.com").await;
    add_event(&app, &user, "last of april", "2024-04-30T23:59:59Z").await;
    add_event(&app, &user, "first of may", "2024-05-01").await;
    add_event(&app, &user, "end of may", "2024-05-31T22:00:00Z").await;
    add_event(&app, &user, "first of june", "2024-06-01T00:00:00Z").await;

    let may = expect_data(
        &app.server.get("/calendar/accueil/5/2024").authorization_bearer(&user.token).await,
        StatusCode::OK,
    );
    assert_eq!(names(&may), vec!["first of may", "end of may"]);
}

#[tokio::test]
async fn test_invalid_month_is_rejected() {
    let app = TestApp::new().await;
    let user = app.create_user("jane@example.com").await;

    let response = app.server.get("/calendar/accueil/13/2024").authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_week_view_runs_monday_to_sunday() {
    let app = TestApp::new().await;
    let user = app.create_user("jane@example.com").await;
    add_event(&app, &user, "sunday before", "2024-05-12T10:00:00Z").await;
    add_event(&app, &user, "monday", "2024-05-13T08:00:00Z").await;
    add_event(&app, &user, "sunday", "2024-05-19T20:00:00Z").await;
    add_event(&app, &user, "next monday", "2024-05-20").await;

    for day in ["2024-05-16", "2024-05-16T09:00:00Z"] {
        let week = expect_data(
            &app.server
                .get(&format!("/calendar/week/{day}"))
                .authorization_bearer(&user.token)
                .await,
            StatusCode::OK,
        );
        assert_eq!(names(&week), vec!["monday", "sunday"], "week of {day}");
    }
}

#[tokio::test]
async fn test_events_are_private() {
    let app = TestApp::new().await;
    let jane = app.create_user("jane@example.com").await;
    let john = app.create_user("john@example.com").await;
    let event = add_event(&app, &jane, "dentist", "2024-05-10T09:00:00Z").await;
    let event_id = event["id"].as_i64().unwrap();

    let johns_month = expect_data(
        &app.server.get("/calendar/accueil/5/2024").authorization_bearer(&john.token).await,
        StatusCode::OK,
    );
    assert_eq!(johns_month, json!([]));

    let update = app
        .server
        .put(&format!("/calendar/{event_id}"))
        .authorization_bearer(&john.token)
        .json(&json!({"name": "hijacked"}))
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);

    let delete = app
        .server
        .delete(&format!("/calendar/{event_id}"))
        .authorization_bearer(&john.token)
        .await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_and_delete_event() {
    let app = TestApp::new().await;
    let user = app.create_user("jane@example.com").await;
    let event = add_event(&app, &user, "dentist", "2024-05-10T09:00:00Z").await;
    let event_id = event["id"].as_i64().unwrap();

    let moved = expect_data(
        &app.server
            .put(&format!("/calendar/{event_id}"))
            .authorization_bearer(&user.token)
            .json(&json!({"dateEvent": "2024-06-02", "description": "bring card"}))
            .await,
        StatusCode::OK,
    );
    assert_eq!(moved["name"], "dentist");
    assert_eq!(moved["description"], "bring card");

    let june = expect_data(
        &app.server.get("/calendar/accueil/6/2024").authorization_bearer(&user.token).await,
        StatusCode::OK,
    );
    assert_eq!(names(&june), vec!["dentist"]);

    let empty = app
        .server
        .put(&format!("/calendar/{event_id}"))
        .authorization_bearer(&user.token)
        .json(&json!({}))
        .await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);

    let deleted = app
        .server
        .delete(&format!("/calendar/{event_id}"))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_event_validates_input() {
    let app = TestApp::new().await;
    let user = app.create_user("jane@example.com").await;

    for body in [
        json!({"name": " ", "dateEvent": "2024-05-10"}),
        json!({"name": "party", "dateEvent": "tomorrow"}),
    ] {
        let response = app.server.post("/calendar").authorization_bearer(&user.token).json(&body).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
}
