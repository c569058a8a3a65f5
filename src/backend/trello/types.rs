//! Board, list and card types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A board with its card counters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    pub card_completed: i64,
    pub card_global: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
}

/// A board with every list and card, both in position order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    #[serde(flatten)]
    pub board: Board,
    pub lists: Vec<ListView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrelloList {
    pub id: i64,
    pub name: String,
    pub position: i64,
    pub trello_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListView {
    #[serde(flatten)]
    pub list: TrelloList,
    pub cards: Vec<Card>,
}

/// User assigned to a card
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    pub id: i64,
    pub name: String,
    pub first_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub real_date: NaiveDate,
    pub position: i64,
    pub list_id: i64,
    pub realised: bool,
    pub statut_id: i64,
    /// Status label, e.g. `completed`
    pub statut: String,
    pub realisator_id: Option<i64>,
    #[sqlx(skip)]
    pub users: Vec<Assignee>,
}

/// Body carrying only a name (boards and lists)
#[derive(Debug, Deserialize, Serialize)]
pub struct NameRequest {
    pub name: String,
}

/// PUT .../list/{listId}/move
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveListRequest {
    pub position: i64,
}

/// PUT .../list/reorder
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderListsRequest {
    #[serde(alias = "orderedlistIds")]
    pub ordered_list_ids: Vec<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user_ids: Vec<i64>,
    #[serde(default)]
    pub real_date: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub real_date: Option<String>,
    #[serde(default)]
    pub user_ids: Option<Vec<i64>>,
}

/// PUT .../card/reorder/{cardId}
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveCardRequest {
    pub list_id: i64,
    pub new_position: i64,
}
