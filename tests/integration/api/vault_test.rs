//! Password vault

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::assertions::expect_data;
use crate::common::TestApp;

#[tokio::test]
async fn test_vault_round_trip() {
    let app = TestApp::new().await;
    let user = app.create_user("jane@example.com").await;

    let created = app
        .server
        .post("/vault")
        .authorization_bearer(&user.token)
        .json(&json!({
            "siteName": "  example.org ",
            "username": "jane",
            "password": "q83hd0== ",
            "iv": "a1b2c3"
        }))
        .await;
    let entry = expect_data(&created, StatusCode::CREATED);
    assert_eq!(entry["siteName"], "example.org");
    assert_eq!(entry["password"], "q83hd0== ");
    let entry_id = entry["id"].as_i64().unwrap();

    let updated = app
        .server
        .put(&format!("/vault/{entry_id}"))
        .authorization_bearer(&user.token)
        .json(&json!({"password": "zz99", "iv": "d4e5f6", "username": ""}))
        .await;
    let entry = expect_data(&updated, StatusCode::OK);
    assert_eq!(entry["password"], "zz99");
    assert_eq!(entry["iv"], "d4e5f6");
    assert_eq!(entry["username"], "jane");

    let listed = expect_data(
        &app.server.get("/vault").authorization_bearer(&user.token).await,
        StatusCode::OK,
    );
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let deleted = app
        .server
        .delete(&format!("/vault/{entry_id}"))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);
    let listed = expect_data(
        &app.server.get("/vault").authorization_bearer(&user.token).await,
        StatusCode::OK,
    );
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_vault_requires_every_field() {
    let app = TestApp::new().await;
    let user = app.create_user("jane@example.com").await;

    let response = app
        .server
        .post("/vault")
        .authorization_bearer(&user.token)
        .json(&json!({"siteName": "example.org", "username": "jane", "password": "", "iv": "x"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_update_is_rejected() {
    let app = TestApp::new().await;
    let user = app.create_user("jane@example.com").await;
    let created = app
        .server
        .post("/vault")
        .authorization_bearer(&user.token)
        .json(&json!({"siteName": "a", "username": "b", "password": "c", "iv": "d"}))
        .await;
    let entry_id = expect_data(&created, StatusCode::CREATED)["id"].as_i64().unwrap();

    let response = app
        .server
        .put(&format!("/vault/{entry_id}"))
        .authorization_bearer(&user.token)
        .json(&json!({"siteName": "  "}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_entries_of_other_users_are_invisible() {
    let app = TestApp::new().await;
    let jane = app.create_user("jane@example.com").await;
    let john = app.create_user("john@example.com").await;
    let created = app
        .server
        .post("/vault")
        .authorization_bearer(&jane.token)
        .json(&json!({"siteName": "bank", "username": "jane", "password": "secret", "iv": "iv"}))
        .await;
    let entry_id = expect_data(&created, StatusCode::CREATED)["id"].as_i64().unwrap();

    let listed = expect_data(
        &app.server.get("/vault").authorization_bearer(&john.token).await,
        StatusCode::OK,
    );
    assert_eq!(listed, json!([]));

    let update = app
        .server
        .put(&format!("/vault/{entry_id}"))
        .authorization_bearer(&john.token)
        .json(&json!({"password": "mine now"}))
        .await;
    assert_eq!(update.status_code(), StatusCode::NOT_FOUND);

    let delete = app
        .server
        .delete(&format!("/vault/{entry_id}"))
        .authorization_bearer(&john.token)
        .await;
    assert_eq!(delete.status_code(), StatusCode::NOT_FOUND);
}
