//! Password vault
//!
//! Entries are encrypted in the browser; the server stores `password` and
//! `iv` exactly as received and never looks inside them.

pub mod db;
pub mod handlers;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VaultEntry {
    pub id: i64,
    pub site_name: String,
    pub username: String,
    pub password: String,
    pub iv: String,
    pub user_id: i64,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub site_name: String,
    pub username: String,
    pub password: String,
    pub iv: String,
}

/// Blank fields are ignored; at least one field must carry a value
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEntryRequest {
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub iv: Option<String>,
}
