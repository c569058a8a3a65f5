//! To-do request and response types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A to-do with its completion counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoSummary {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    pub task_completed: i64,
    pub task_global: i64,
}

/// To-do row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
}

/// Task row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub position: i64,
    pub todo_id: i64,
    pub realised: bool,
    pub statut_id: i64,
    pub realisator_id: Option<i64>,
    pub real_date: Option<NaiveDate>,
    #[sqlx(skip)]
    pub user_ids: Vec<i64>,
}

/// Body carrying only a name (create and rename a to-do)
#[derive(Debug, Deserialize, Serialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: String,
    #[serde(default)]
    pub user_ids: Vec<i64>,
    #[serde(default)]
    pub real_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub real_date: Option<String>,
    #[serde(default)]
    pub user_ids: Option<Vec<i64>>,
}

/// PUT .../task/{taskId}/move
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveTaskRequest {
    pub position: i64,
}

/// PUT .../task/order
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTasksRequest {
    pub ordered_task_ids: Vec<i64>,
}
