//! Gantt chart and activity types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A chart with its activity counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GanttSummary {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    pub activity_completed: i64,
    pub activity_global: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Gantt {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub progress: i64,
    pub statut_id: i64,
    pub gantt_id: i64,
}

/// Activity in the shape Gantt chart widgets consume
///
/// `dependencies` is a comma-separated id list, `users` holds assignee names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartTask {
    pub id: String,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub progress: i64,
    pub dependencies: String,
    pub users: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub name: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub user_ids: Vec<i64>,
    #[serde(default, alias = "dependencesIds")]
    pub dependency_ids: Vec<i64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub progress: Option<i64>,
    #[serde(default)]
    pub user_ids: Option<Vec<i64>>,
    #[serde(default, alias = "dependencesIds")]
    pub dependency_ids: Option<Vec<i64>>,
}

impl UpdateActivityRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.progress.is_none()
            && self.user_ids.is_none()
            && self.dependency_ids.is_none()
    }
}

/// Validated activity fields ready to insert
#[derive(Debug, Clone)]
pub struct NewActivity<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub user_ids: &'a [i64],
    pub dependency_ids: &'a [i64],
}

/// Validated partial update; `None` leaves the column or link set untouched
#[derive(Debug, Clone, Default)]
pub struct ActivityChanges<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub progress: Option<i64>,
    pub statut_id: Option<i64>,
    pub user_ids: Option<&'a [i64]>,
    pub dependency_ids: Option<&'a [i64]>,
}
