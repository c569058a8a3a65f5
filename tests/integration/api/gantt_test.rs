//! Gantt charts and activities

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::assertions::expect_data;
use crate::common::{insert_member, insert_project, TestApp, TestUser};
use planhub::backend::middleware::Role;

struct GanttFixture {
    app: TestApp,
    owner: TestUser,
    project_id: i64,
    base: String,
}

async fn gantt_fixture() -> GanttFixture {
    let app = TestApp::new().await;
    let owner = app.create_user("owner@example.com").await;
    let project_id = insert_project(&app.pool, owner.id, "Apollo").await;

    let created = app
        .server
        .post(&format!("/project/{project_id}/gantt"))
        .authorization_bearer(&owner.token)
        .json(&json!({"name": "Roadmap"}))
        .await;
    let gantt = expect_data(&created, StatusCode::CREATED);
    let gantt_id = gantt["id"].as_i64().unwrap();

    GanttFixture {
        base: format!("/project/{project_id}/gantt/{gantt_id}/activity"),
        app,
        owner,
        project_id,
    }
}

impl GanttFixture {
    async fn create(&self, body: Value) -> axum_test::TestResponse {
        self.app
            .server
            .post(&self.base)
            .authorization_bearer(&self.owner.token)
            .json(&body)
            .await
    }

    async fn update(&self, activity_id: i64, body: Value) -> axum_test::TestResponse {
        self.app
            .server
            .put(&format!("{}/{activity_id}", self.base))
            .authorization_bearer(&self.owner.token)
            .json(&body)
            .await
    }

    async fn chart(&self) -> Value {
        expect_data(
            &self.app.server.get(&self.base).authorization_bearer(&self.owner.token).await,
            StatusCode::OK,
        )
    }
}

fn activity(name: &str, start: &str, end: &str) -> Value {
    json!({"name": name, "description": "work", "startDate": start, "endDate": end})
}

#[tokio::test]
async fn test_create_activity_with_dependencies() {
    let fx = gantt_fixture().await;

    let design = expect_data(&fx.create(activity("Design", "2024-03-01", "2024-03-10")).await, StatusCode::CREATED);
    assert_eq!(design["progress"], 0);
    assert_eq!(design["statutId"], 1);
    let design_id = design["id"].as_i64().unwrap();

    let mut build = activity("Build", "2024-03-11", "2024-04-01");
    build["dependencesIds"] = json!([design_id]);
    build["userIds"] = json!([fx.owner.id]);
    expect_data(&fx.create(build).await, StatusCode::CREATED);

    let chart = fx.chart().await;
    assert_eq!(chart.as_array().unwrap().len(), 2);
    assert_eq!(chart[0]["name"], "Design");
    assert_eq!(chart[0]["dependencies"], "");
    assert_eq!(chart[1]["dependencies"], design_id.to_string());
    assert_eq!(chart[1]["users"], json!(["Doe"]));
    assert_eq!(chart[1]["start"], "2024-03-11");
}

#[tokio::test]
async fn test_create_activity_rejects_bad_dates() {
    let fx = gantt_fixture().await;

    for (start, end) in [
        ("2024-03-10", "2024-03-01"),
        ("2024-02-30", "2024-03-01"),
        ("03/01/2024", "2024-03-10"),
    ] {
        let response = fx.create(activity("Design", start, end)).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{start}..{end}");
    }
    assert_eq!(fx.chart().await, json!([]));
}

#[tokio::test]
async fn test_dependencies_must_belong_to_chart() {
    let fx = gantt_fixture().await;
    let other = fx
        .app
        .server
        .post(&format!("/project/{}/gantt", fx.project_id))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"name": "Other"}))
        .await;
    let other_id = expect_data(&other, StatusCode::CREATED)["id"].as_i64().unwrap();
    let foreign = fx
        .app
        .server
        .post(&format!("/project/{}/gantt/{other_id}/activity", fx.project_id))
        .authorization_bearer(&fx.owner.token)
        .json(&activity("Elsewhere", "2024-01-01", "2024-01-02"))
        .await;
    let foreign_id = expect_data(&foreign, StatusCode::CREATED)["id"].as_i64().unwrap();

    let mut body = activity("Build", "2024-03-11", "2024-04-01");
    body["dependencyIds"] = json!([foreign_id]);
    assert_eq!(fx.create(body).await.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_activity_cannot_depend_on_itself() {
    let fx = gantt_fixture().await;
    let design = expect_data(&fx.create(activity("Design", "2024-03-01", "2024-03-10")).await, StatusCode::CREATED);
    let id = design["id"].as_i64().unwrap();

    let response = fx.update(id, json!({"dependencyIds": [id]})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_progress_drives_status() {
    let fx = gantt_fixture().await;
    let design = expect_data(&fx.create(activity("Design", "2024-03-01", "2024-03-10")).await, StatusCode::CREATED);
    let id = design["id"].as_i64().unwrap();

    let halfway = expect_data(&fx.update(id, json!({"progress": 40})).await, StatusCode::OK);
    assert_eq!(halfway["progress"], 40);
    assert_eq!(halfway["statutId"], 2);

    let done = expect_data(&fx.update(id, json!({"progress": 250})).await, StatusCode::OK);
    assert_eq!(done["progress"], 100);
    assert_eq!(done["statutId"], 3);

    let summaries = expect_data(
        &fx.app
            .server
            .get(&format!("/project/{}/gantt", fx.project_id))
            .authorization_bearer(&fx.owner.token)
            .await,
        StatusCode::OK,
    );
    assert_eq!(summaries[0]["activityCompleted"], 1);
    assert_eq!(summaries[0]["activityGlobal"], 1);
}

#[tokio::test]
async fn test_update_checks_dates_against_stored_bounds() {
    let fx = gantt_fixture().await;
    let design = expect_data(&fx.create(activity("Design", "2024-03-01", "2024-03-10")).await, StatusCode::CREATED);
    let id = design["id"].as_i64().unwrap();

    let inverted = fx.update(id, json!({"startDate": "2024-03-20"})).await;
    assert_eq!(inverted.status_code(), StatusCode::BAD_REQUEST);

    let moved = expect_data(
        &fx.update(id, json!({"startDate": "2024-03-20", "endDate": "2024-03-25"})).await,
        StatusCode::OK,
    );
    assert_eq!(moved["startDate"], "2024-03-20");
    assert_eq!(moved["name"], "Design");

    let empty = fx.update(id, json!({})).await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_activity_drops_dependency_links() {
    let fx = gantt_fixture().await;
    let design = expect_data(&fx.create(activity("Design", "2024-03-01", "2024-03-10")).await, StatusCode::CREATED);
    let design_id = design["id"].as_i64().unwrap();
    let mut build = activity("Build", "2024-03-11", "2024-04-01");
    build["dependencyIds"] = json!([design_id]);
    fx.create(build).await;

    let deleted = fx
        .app
        .server
        .delete(&format!("{}/{design_id}", fx.base))
        .authorization_bearer(&fx.owner.token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);

    let chart = fx.chart().await;
    assert_eq!(chart.as_array().unwrap().len(), 1);
    assert_eq!(chart[0]["dependencies"], "");
}

#[tokio::test]
async fn test_members_read_but_only_admins_write() {
    let fx = gantt_fixture().await;
    let member = fx.app.create_user("member@example.com").await;
    insert_member(&fx.app.pool, fx.project_id, member.id, Role::Member).await;

    let read = fx.app.server.get(&fx.base).authorization_bearer(&member.token).await;
    assert_eq!(read.status_code(), StatusCode::OK);

    let write = fx
        .app
        .server
        .post(&fx.base)
        .authorization_bearer(&member.token)
        .json(&activity("Design", "2024-03-01", "2024-03-10"))
        .await;
    assert_eq!(write.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rename_and_delete_gantt() {
    let fx = gantt_fixture().await;
    let gantt_url = fx.base.trim_end_matches("/activity").to_string();

    let renamed = fx
        .app
        .server
        .put(&gantt_url)
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"name": "Plan B"}))
        .await;
    assert_eq!(expect_data(&renamed, StatusCode::OK)["name"], "Plan B");

    let deleted = fx.app.server.delete(&gantt_url).authorization_bearer(&fx.owner.token).await;
    assert_eq!(deleted.status_code(), StatusCode::OK);

    let gone = fx.app.server.get(&fx.base).authorization_bearer(&fx.owner.token).await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
}
