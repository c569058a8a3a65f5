/**
 * Quick Search
 *
 * `GET /user/search/{term}` returns at most `SEARCH_LIMIT` items whose name
 * contains `term`, ignoring case. Kinds are filled in the fixed order of
 * `SearchKind::ORDER`; each query only asks for the slots still free, so an
 * early kind with many matches hides the later ones.
 *
 * Visibility:
 * - projects, charts, to-dos and boards of projects the caller is a member
 *   of (deleted projects excluded)
 * - the caller's own calendar events
 * - activities, tasks and cards assigned to the caller
 */

use axum::extract::State;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::extract::Path;
use crate::backend::middleware::AuthUser;
use crate::backend::response::ApiResponse;

pub const SEARCH_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Project,
    Calendar,
    Gantt,
    GanttActivity,
    Todo,
    TodoTask,
    Trello,
    TrelloCard,
}

// $1 user id, $2 search term, $3 remaining quota
const MEMBER_PROJECT: &str =
    "p.deleted = 0 AND EXISTS (SELECT 1 FROM user_projects up WHERE up.project_id = p.id AND up.user_id = $1)";
const NAME_MATCH: &str = "instr(lower(x.name), lower($2)) > 0";

impl SearchKind {
    pub const ORDER: [SearchKind; 8] = [
        SearchKind::Project,
        SearchKind::Calendar,
        SearchKind::Gantt,
        SearchKind::GanttActivity,
        SearchKind::Todo,
        SearchKind::TodoTask,
        SearchKind::Trello,
        SearchKind::TrelloCard,
    ];

    /// Query yielding `id, name, description, project_name`
    fn query(self) -> String {
        match self {
            SearchKind::Project => format!(
                "SELECT p.id, p.name, p.description, NULL AS project_name FROM projects p \
                 WHERE {MEMBER_PROJECT} AND instr(lower(p.name), lower($2)) > 0 ORDER BY p.id LIMIT $3"
            ),
            SearchKind::Calendar => format!(
                "SELECT x.id, x.name, x.description, NULL AS project_name FROM calendar_events x \
                 WHERE x.user_id = $1 AND {NAME_MATCH} ORDER BY x.date_event LIMIT $3"
            ),
            SearchKind::Gantt => Self::project_child("gantts"),
            SearchKind::Todo => Self::project_child("todos"),
            SearchKind::Trello => Self::project_child("trellos"),
            SearchKind::GanttActivity => format!(
                "SELECT x.id, x.name, x.description, p.name AS project_name FROM gantt_activities x \
                 JOIN gantt_activity_users au ON au.activity_id = x.id AND au.user_id = $1 \
                 JOIN gantts g ON g.id = x.gantt_id JOIN projects p ON p.id = g.project_id \
                 WHERE p.deleted = 0 AND {NAME_MATCH} ORDER BY x.id LIMIT $3"
            ),
            SearchKind::TodoTask => format!(
                "SELECT x.id, x.name, NULL AS description, p.name AS project_name FROM todo_tasks x \
                 JOIN todo_task_users tu ON tu.task_id = x.id AND tu.user_id = $1 \
                 JOIN todos d ON d.id = x.todo_id JOIN projects p ON p.id = d.project_id \
                 WHERE p.deleted = 0 AND {NAME_MATCH} ORDER BY x.id LIMIT $3"
            ),
            SearchKind::TrelloCard => format!(
                "SELECT x.id, x.name, x.description, p.name AS project_name FROM trello_cards x \
                 JOIN trello_card_users cu ON cu.card_id = x.id AND cu.user_id = $1 \
                 JOIN trello_lists l ON l.id = x.list_id JOIN trellos b ON b.id = l.trello_id \
                 JOIN projects p ON p.id = b.project_id \
                 WHERE p.deleted = 0 AND {NAME_MATCH} ORDER BY x.id LIMIT $3"
            ),
        }
    }

    fn project_child(table: &str) -> String {
        format!(
            "SELECT x.id, x.name, NULL AS description, p.name AS project_name FROM {table} x \
             JOIN projects p ON p.id = x.project_id \
             WHERE {MEMBER_PROJECT} AND {NAME_MATCH} ORDER BY x.id LIMIT $3"
        )
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SearchRow {
    id: i64,
    name: String,
    description: Option<String>,
    project_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SearchKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

pub async fn search_items(
    pool: &SqlitePool,
    user_id: i64,
    term: &str,
) -> Result<Vec<SearchResult>, sqlx::Error> {
    let mut results = Vec::with_capacity(SEARCH_LIMIT);

    for kind in SearchKind::ORDER {
        let remaining = SEARCH_LIMIT - results.len();
        if remaining == 0 {
            break;
        }

        let rows = sqlx::query_as::<_, SearchRow>(&kind.query())
            .bind(user_id)
            .bind(term)
            .bind(remaining as i64)
            .fetch_all(pool)
            .await?;
        results.extend(rows.into_iter().map(|row| SearchResult {
            id: row.id,
            name: row.name,
            kind,
            description: row.description,
            project_name: row.project_name,
        }));
    }

    Ok(results)
}

/// GET /user/search/{term}
pub async fn search(
    AuthUser(user): AuthUser,
    State(pool): State<SqlitePool>,
    Path(term): Path<String>,
) -> Result<ApiResponse<Vec<SearchResult>>, BackendError> {
    let term = term.trim();
    if term.is_empty() {
        return Ok(ApiResponse::ok(Vec::new()));
    }

    let results = search_items(&pool, user.user_id, term).await?;
    tracing::debug!("Search for {:?} by user {} gave {} results", term, user.user_id, results.len());
    Ok(ApiResponse::ok(results))
}
