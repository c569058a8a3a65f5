//! Reordering over HTTP: to-do tasks, board lists and cards
//!
//! Scenarios seed rows directly, call the endpoint, then read positions back
//! from the database.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::assertions::{expect_data, expect_error};
use crate::common::{
    insert_board, insert_cards, insert_lists, insert_project, insert_tasks, insert_todo, names_in_order,
    ordering_of, TestApp, TestUser,
};

struct TodoFixture {
    app: TestApp,
    owner: TestUser,
    base: String,
    todo_id: i64,
    tasks: Vec<i64>,
}

async fn todo_fixture(names: &[&str]) -> TodoFixture {
    let app = TestApp::new().await;
    let owner = app.create_user("owner@example.com").await;
    let project_id = insert_project(&app.pool, owner.id, "Apollo").await;
    let todo_id = insert_todo(&app.pool, project_id).await;
    let tasks = insert_tasks(&app.pool, todo_id, names).await;
    TodoFixture {
        base: format!("/project/{project_id}/todo/{todo_id}/task"),
        app,
        owner,
        todo_id,
        tasks,
    }
}

#[tokio::test]
async fn test_created_tasks_are_appended() {
    let fx = todo_fixture(&["A", "B"]).await;

    let response = fx
        .app
        .server
        .post(&fx.base)
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"name": "C", "userIds": [fx.owner.id]}))
        .await;
    let task = expect_data(&response, StatusCode::CREATED);
    assert_eq!(task["position"], 3);
    assert_eq!(task["userIds"], json!([fx.owner.id]));
}

#[tokio::test]
async fn test_move_task_up() {
    let fx = todo_fixture(&["A", "B", "C", "D"]).await;

    let response = fx
        .app
        .server
        .put(&format!("{}/{}/move", fx.base, fx.tasks[2]))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"position": 1}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let order = ordering_of(&fx.app.pool, "todo_tasks", "todo_id", fx.todo_id).await;
    assert_eq!(
        order,
        vec![("C".into(), 1), ("A".into(), 2), ("B".into(), 3), ("D".into(), 4)]
    );
}

#[tokio::test]
async fn test_move_task_down_then_list_in_order() {
    let fx = todo_fixture(&["A", "B", "C"]).await;

    fx.app
        .server
        .put(&format!("{}/{}/move", fx.base, fx.tasks[0]))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"position": 3}))
        .await;

    let listed = expect_data(
        &fx.app.server.get(&fx.base).authorization_bearer(&fx.owner.token).await,
        StatusCode::OK,
    );
    let names: Vec<&str> = listed.as_array().unwrap().iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["B", "C", "A"]);
}

#[tokio::test]
async fn test_move_task_out_of_range_changes_nothing() {
    let fx = todo_fixture(&["A", "B", "C"]).await;

    for position in [0, 4, -2] {
        let response = fx
            .app
            .server
            .put(&format!("{}/{}/move", fx.base, fx.tasks[1]))
            .authorization_bearer(&fx.owner.token)
            .json(&json!({"position": position}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "position {position}");
    }

    assert_eq!(names_in_order(&fx.app.pool, "todo_tasks", "todo_id", fx.todo_id).await, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_order_tasks_in_bulk() {
    let fx = todo_fixture(&["A", "B", "C"]).await;
    let (a, b, c) = (fx.tasks[0], fx.tasks[1], fx.tasks[2]);

    let response = fx
        .app
        .server
        .put(&format!("{}/order", fx.base))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"orderedTaskIds": [c, a, b]}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(names_in_order(&fx.app.pool, "todo_tasks", "todo_id", fx.todo_id).await, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_order_tasks_rejects_incomplete_sets() {
    let fx = todo_fixture(&["A", "B", "C"]).await;
    let (a, b) = (fx.tasks[0], fx.tasks[1]);

    for ids in [json!([b, a]), json!([b, a, 9999]), json!([b, a, a])] {
        let response = fx
            .app
            .server
            .put(&format!("{}/order", fx.base))
            .authorization_bearer(&fx.owner.token)
            .json(&json!({"orderedTaskIds": ids}))
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }
    assert_eq!(names_in_order(&fx.app.pool, "todo_tasks", "todo_id", fx.todo_id).await, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_malformed_move_body_is_bad_request() {
    let fx = todo_fixture(&["A", "B", "C"]).await;
    let url = format!("{}/{}/move", fx.base, fx.tasks[1]);

    for body in [json!({}), json!({"position": "first"}), json!({"position": 1.5}), json!({"position": null})] {
        let response = fx
            .app
            .server
            .put(&url)
            .authorization_bearer(&fx.owner.token)
            .json(&body)
            .await;
        let message = expect_error(&response, StatusCode::BAD_REQUEST);
        assert!(message.contains("position"), "{body}: {message}");
    }

    let response = fx
        .app
        .server
        .put(&url)
        .authorization_bearer(&fx.owner.token)
        .text("position=1")
        .await;
    expect_error(&response, StatusCode::BAD_REQUEST);

    assert_eq!(names_in_order(&fx.app.pool, "todo_tasks", "todo_id", fx.todo_id).await, vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_malformed_order_body_is_bad_request() {
    let fx = todo_fixture(&["A", "B"]).await;

    for body in [json!({"orderedTaskIds": "nope"}), json!({"orderedTaskIds": ["a", "b"]}), json!({})] {
        let response = fx
            .app
            .server
            .put(&format!("{}/order", fx.base))
            .authorization_bearer(&fx.owner.token)
            .json(&body)
            .await;
        expect_error(&response, StatusCode::BAD_REQUEST);
    }
    assert_eq!(names_in_order(&fx.app.pool, "todo_tasks", "todo_id", fx.todo_id).await, vec!["A", "B"]);
}

#[tokio::test]
async fn test_non_numeric_task_id_is_bad_request() {
    let fx = todo_fixture(&["A"]).await;

    let response = fx
        .app
        .server
        .put(&format!("{}/first/move", fx.base))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"position": 1}))
        .await;
    expect_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_task_closes_the_gap() {
    let fx = todo_fixture(&["A", "B", "C"]).await;

    let response = fx
        .app
        .server
        .delete(&format!("{}/{}", fx.base, fx.tasks[0]))
        .authorization_bearer(&fx.owner.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let order = ordering_of(&fx.app.pool, "todo_tasks", "todo_id", fx.todo_id).await;
    assert_eq!(order, vec![("B".into(), 1), ("C".into(), 2)]);
}

#[tokio::test]
async fn test_realised_task_moves_to_realised_listing() {
    let fx = todo_fixture(&["A", "B"]).await;

    let response = fx
        .app
        .server
        .put(&format!("{}/{}/realised", fx.base, fx.tasks[0]))
        .authorization_bearer(&fx.owner.token)
        .await;
    let task = expect_data(&response, StatusCode::OK);
    assert_eq!(task["realised"], true);
    assert_eq!(task["realisatorId"], fx.owner.id);
    assert!(task["realDate"].is_string());

    let open = expect_data(
        &fx.app.server.get(&fx.base).authorization_bearer(&fx.owner.token).await,
        StatusCode::OK,
    );
    assert_eq!(open.as_array().unwrap().len(), 1);

    let done = expect_data(
        &fx.app
            .server
            .get(&format!("{}/realised", fx.base))
            .authorization_bearer(&fx.owner.token)
            .await,
        StatusCode::OK,
    );
    assert_eq!(done[0]["name"], "A");
}

#[tokio::test]
async fn test_missing_task_is_not_found() {
    let fx = todo_fixture(&["A"]).await;

    let response = fx
        .app
        .server
        .put(&format!("{}/424242/move", fx.base))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"position": 1}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

struct BoardFixture {
    app: TestApp,
    owner: TestUser,
    base: String,
    trello_id: i64,
    lists: Vec<i64>,
}

async fn board_fixture(list_names: &[&str]) -> BoardFixture {
    let app = TestApp::new().await;
    let owner = app.create_user("owner@example.com").await;
    let project_id = insert_project(&app.pool, owner.id, "Apollo").await;
    let trello_id = insert_board(&app.pool, project_id).await;
    let lists = insert_lists(&app.pool, trello_id, list_names).await;
    BoardFixture {
        base: format!("/project/{project_id}/trello/{trello_id}"),
        app,
        owner,
        trello_id,
        lists,
    }
}

#[tokio::test]
async fn test_move_and_reorder_lists() {
    let fx = board_fixture(&["Todo", "Doing", "Done"]).await;

    let moved = fx
        .app
        .server
        .put(&format!("{}/list/{}/move", fx.base, fx.lists[0]))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"position": 3}))
        .await;
    assert_eq!(moved.status_code(), StatusCode::OK);
    assert_eq!(
        names_in_order(&fx.app.pool, "trello_lists", "trello_id", fx.trello_id).await,
        vec!["Doing", "Done", "Todo"]
    );

    let reordered = fx
        .app
        .server
        .put(&format!("{}/list/reorder", fx.base))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"orderedListIds": fx.lists}))
        .await;
    assert_eq!(reordered.status_code(), StatusCode::OK);
    assert_eq!(
        names_in_order(&fx.app.pool, "trello_lists", "trello_id", fx.trello_id).await,
        vec!["Todo", "Doing", "Done"]
    );
}

#[tokio::test]
async fn test_move_card_across_lists() {
    let fx = board_fixture(&["Source", "Dest"]).await;
    let source = insert_cards(&fx.app.pool, fx.lists[0], &["A", "B", "C"]).await;
    insert_cards(&fx.app.pool, fx.lists[1], &["X", "Y"]).await;

    let response = fx
        .app
        .server
        .put(&format!("{}/list/{}/card/reorder/{}", fx.base, fx.lists[0], source[1]))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"listId": fx.lists[1], "newPosition": 2}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    assert_eq!(
        ordering_of(&fx.app.pool, "trello_cards", "list_id", fx.lists[0]).await,
        vec![("A".into(), 1), ("C".into(), 2)]
    );
    assert_eq!(
        ordering_of(&fx.app.pool, "trello_cards", "list_id", fx.lists[1]).await,
        vec![("X".into(), 1), ("B".into(), 2), ("Y".into(), 3)]
    );

    let board = expect_data(
        &fx.app.server.get(&fx.base).authorization_bearer(&fx.owner.token).await,
        StatusCode::OK,
    );
    let dest_cards: Vec<&str> = board["lists"][1]["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(dest_cards, vec!["X", "B", "Y"]);
}

#[tokio::test]
async fn test_move_card_with_malformed_position_is_bad_request() {
    let fx = board_fixture(&["Source", "Dest"]).await;
    let source = insert_cards(&fx.app.pool, fx.lists[0], &["A", "B"]).await;

    let response = fx
        .app
        .server
        .put(&format!("{}/list/{}/card/reorder/{}", fx.base, fx.lists[0], source[0]))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"listId": fx.lists[1], "newPosition": "top"}))
        .await;
    let message = expect_error(&response, StatusCode::BAD_REQUEST);
    assert!(message.contains("newPosition"), "{message}");

    assert_eq!(names_in_order(&fx.app.pool, "trello_cards", "list_id", fx.lists[0]).await, vec!["A", "B"]);
}

#[tokio::test]
async fn test_move_card_to_end_of_other_list() {
    let fx = board_fixture(&["Source", "Dest"]).await;
    let source = insert_cards(&fx.app.pool, fx.lists[0], &["A"]).await;
    insert_cards(&fx.app.pool, fx.lists[1], &["X", "Y"]).await;

    let too_far = fx
        .app
        .server
        .put(&format!("{}/list/{}/card/reorder/{}", fx.base, fx.lists[0], source[0]))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"listId": fx.lists[1], "newPosition": 4}))
        .await;
    assert_eq!(too_far.status_code(), StatusCode::BAD_REQUEST);

    let end = fx
        .app
        .server
        .put(&format!("{}/list/{}/card/reorder/{}", fx.base, fx.lists[0], source[0]))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"listId": fx.lists[1], "newPosition": 3}))
        .await;
    assert_eq!(end.status_code(), StatusCode::OK);
    assert!(ordering_of(&fx.app.pool, "trello_cards", "list_id", fx.lists[0]).await.is_empty());
    assert_eq!(
        names_in_order(&fx.app.pool, "trello_cards", "list_id", fx.lists[1]).await,
        vec!["X", "Y", "A"]
    );
}

#[tokio::test]
async fn test_move_card_to_list_of_other_board_is_not_found() {
    let fx = board_fixture(&["Source"]).await;
    let cards = insert_cards(&fx.app.pool, fx.lists[0], &["A"]).await;
    let project_id: i64 = sqlx::query_scalar("SELECT project_id FROM trellos WHERE id = $1")
        .bind(fx.trello_id)
        .fetch_one(&fx.app.pool)
        .await
        .unwrap();
    let other_board = insert_board(&fx.app.pool, project_id).await;
    let foreign_list = insert_lists(&fx.app.pool, other_board, &["Elsewhere"]).await[0];

    let response = fx
        .app
        .server
        .put(&format!("{}/list/{}/card/reorder/{}", fx.base, fx.lists[0], cards[0]))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"listId": foreign_list, "newPosition": 1}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(names_in_order(&fx.app.pool, "trello_cards", "list_id", fx.lists[0]).await, vec!["A"]);
}

#[tokio::test]
async fn test_card_lifecycle() {
    let fx = board_fixture(&["Todo"]).await;
    let cards_url = format!("{}/list/{}/card", fx.base, fx.lists[0]);

    let created = fx
        .app
        .server
        .post(&cards_url)
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"name": "Write docs", "realDate": "2024-06-30", "userIds": [fx.owner.id]}))
        .await;
    let card = expect_data(&created, StatusCode::CREATED);
    assert_eq!(card["position"], 1);
    assert_eq!(card["realDate"], "2024-06-30");
    assert_eq!(card["statut"], "pending");
    assert_eq!(card["users"][0]["id"], fx.owner.id);
    let card_id = card["id"].as_i64().unwrap();

    let bad_date = fx
        .app
        .server
        .post(&cards_url)
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"name": "Broken", "realDate": "2024-02-30"}))
        .await;
    assert_eq!(bad_date.status_code(), StatusCode::BAD_REQUEST);

    let updated = fx
        .app
        .server
        .put(&format!("{cards_url}/{card_id}"))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"description": "in the README", "userIds": []}))
        .await;
    let card = expect_data(&updated, StatusCode::OK);
    assert_eq!(card["description"], "in the README");
    assert_eq!(card["users"], json!([]));

    let realised = fx
        .app
        .server
        .put(&format!("{cards_url}/realised/{card_id}"))
        .authorization_bearer(&fx.owner.token)
        .await;
    let card = expect_data(&realised, StatusCode::OK);
    assert_eq!(card["statut"], "completed");
    assert_eq!(card["realisatorId"], fx.owner.id);

    let boards = expect_data(
        &fx.app
            .server
            .get(fx.base.rsplit_once('/').unwrap().0)
            .authorization_bearer(&fx.owner.token)
            .await,
        StatusCode::OK,
    );
    assert_eq!(boards[0]["cardCompleted"], 1);
    assert_eq!(boards[0]["cardGlobal"], 1);

    let deleted = fx
        .app
        .server
        .delete(&format!("{cards_url}/{card_id}"))
        .authorization_bearer(&fx.owner.token)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_card_assignee_must_be_member() {
    let fx = board_fixture(&["Todo"]).await;
    let outsider = fx.app.create_user("outsider@example.com").await;

    let response = fx
        .app
        .server
        .post(&format!("{}/list/{}/card", fx.base, fx.lists[0]))
        .authorization_bearer(&fx.owner.token)
        .json(&json!({"name": "Card", "userIds": [outsider.id]}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_list_compacts_board() {
    let fx = board_fixture(&["A", "B", "C"]).await;

    let response = fx
        .app
        .server
        .delete(&format!("{}/list/{}", fx.base, fx.lists[1]))
        .authorization_bearer(&fx.owner.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        ordering_of(&fx.app.pool, "trello_lists", "trello_id", fx.trello_id).await,
        vec![("A".into(), 1), ("C".into(), 2)]
    );
}
