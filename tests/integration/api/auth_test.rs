//! Authentication API integration tests
//!
//! Login, registration (multipart with photo) and the token check in front
//! of protected routes.

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::assertions::expect_data;
use crate::common::{TestApp, TEST_PASSWORD};

fn register_form(email: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("email", email)
        .add_text("password", "s3cret-pass")
        .add_text("name", "Doe")
        .add_text("firstName", "Jane")
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new().await;

    let response = app.server.post("/auth/register").multipart(register_form("Jane.Doe@Example.com")).await;
    let user = expect_data(&response, StatusCode::CREATED);
    assert_eq!(user["email"], "jane.doe@example.com");
    assert_eq!(user["firstName"], "Jane");
    assert!(user.get("passwordHash").is_none());

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({"email": "JANE.DOE@example.com", "password": "s3cret-pass"}))
        .await;
    let data = expect_data(&response, StatusCode::OK);
    let token = data["token"].as_str().unwrap();

    let claims = app.tokens.verify_token(token).unwrap();
    assert_eq!(claims.sub, user["id"].as_i64().unwrap());
}

#[tokio::test]
async fn test_register_stores_photo() {
    let app = TestApp::new().await;

    let form = register_form("photo@example.com").add_part(
        "photo",
        Part::bytes(vec![0x89, b'P', b'N', b'G']).file_name("me.PNG").mime_type("image/png"),
    );
    let response = app.server.post("/auth/register").multipart(form).await;
    let user = expect_data(&response, StatusCode::CREATED);

    let photo = user["photo"].as_str().unwrap();
    assert!(photo.starts_with("/uploads/") && photo.ends_with(".png"), "{photo}");
    let file_name = photo.trim_start_matches("/uploads/");
    assert!(app.uploads.path().join(file_name).exists());

    let served = app.server.get(photo).await;
    assert_eq!(served.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_rejects_bad_photo_extension() {
    let app = TestApp::new().await;

    let form = register_form("gif@example.com")
        .add_part("photo", Part::bytes(b"GIF89a".to_vec()).file_name("me.gif"));
    let response = app.server.post("/auth/register").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::new().await;
    app.create_user("taken@example.com").await;

    let response = app.server.post("/auth/register").multipart(register_form("Taken@example.com")).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = TestApp::new().await;

    let form = MultipartForm::new().add_text("email", "half@example.com").add_text("password", "x");
    let response = app.server.post("/auth/register").multipart(form).await;
    let data = expect_data(&response, StatusCode::BAD_REQUEST);
    assert_eq!(data, "name is required");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = TestApp::new().await;
    let user = app.create_user("jane@example.com").await;

    let wrong_password = app
        .server
        .post("/auth/login")
        .json(&json!({"email": user.email, "password": "nope"}))
        .await;
    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);

    let unknown = app
        .server
        .post("/auth/login")
        .json(&json!({"email": "ghost@example.com", "password": TEST_PASSWORD}))
        .await;
    let body: serde_json::Value = unknown.json();
    assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"message": "Unauthorized", "data": "invalid e-mail or password"}));
}

#[tokio::test]
async fn test_protected_route_needs_token() {
    let app = TestApp::new().await;

    let missing = app.server.get("/project").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

    let garbage = app.server.get("/project").authorization_bearer("not-a-token").await;
    assert_eq!(garbage.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let app = TestApp::new().await;
    let user = app.create_user("gone@example.com").await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app.server.get("/user").authorization_bearer(&user.token).await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_catalog_is_public() {
    let app = TestApp::new().await;

    let roles = expect_data(&app.server.get("/role").await, StatusCode::OK);
    assert_eq!(roles, json!([{"id": 1, "name": "Admin"}, {"id": 2, "name": "Member"}]));

    let statuts = expect_data(&app.server.get("/statut").await, StatusCode::OK);
    assert_eq!(statuts.as_array().unwrap().len(), 3);
}
