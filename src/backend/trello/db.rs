//! Board, list and card persistence

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::SqlitePool;

use super::types::{Assignee, Board, BoardSummary, Card, ListView, TrelloList};
use crate::backend::catalog::Statut;
use crate::backend::ordering::{self, TrelloCards, TrelloLists};

const CARD_SELECT: &str = r#"
    SELECT c.id, c.name, c.description, c.real_date, c.position, c.list_id, c.realised,
           c.statut_id, s.libelle AS statut, c.realisator_id
    FROM trello_cards c
    JOIN statuts s ON s.id = c.statut_id
"#;

pub async fn list_boards(pool: &SqlitePool, project_id: i64) -> Result<Vec<BoardSummary>, sqlx::Error> {
    sqlx::query_as::<_, BoardSummary>(
        r#"
        SELECT b.id, b.name, b.project_id,
               COUNT(CASE WHEN c.statut_id = $2 THEN 1 END) AS card_completed,
               COUNT(c.id) AS card_global
        FROM trellos b
        LEFT JOIN trello_lists l ON l.trello_id = b.id
        LEFT JOIN trello_cards c ON c.list_id = l.id
        WHERE b.project_id = $1
        GROUP BY b.id
        ORDER BY b.id
        "#,
    )
    .bind(project_id)
    .bind(Statut::COMPLETED)
    .fetch_all(pool)
    .await
}

/// The board, if it belongs to the project
pub async fn find_board(
    pool: &SqlitePool,
    project_id: i64,
    trello_id: i64,
) -> Result<Option<Board>, sqlx::Error> {
    sqlx::query_as::<_, Board>("SELECT id, name, project_id FROM trellos WHERE id = $1 AND project_id = $2")
        .bind(trello_id)
        .bind(project_id)
        .fetch_optional(pool)
        .await
}

pub async fn create_board(pool: &SqlitePool, project_id: i64, name: &str) -> Result<Board, sqlx::Error> {
    sqlx::query_as::<_, Board>(
        "INSERT INTO trellos (name, project_id) VALUES ($1, $2) RETURNING id, name, project_id",
    )
    .bind(name)
    .bind(project_id)
    .fetch_one(pool)
    .await
}

pub async fn rename_board(pool: &SqlitePool, trello_id: i64, name: &str) -> Result<Board, sqlx::Error> {
    sqlx::query_as::<_, Board>("UPDATE trellos SET name = $1 WHERE id = $2 RETURNING id, name, project_id")
        .bind(name)
        .bind(trello_id)
        .fetch_one(pool)
        .await
}

pub async fn delete_board(pool: &SqlitePool, trello_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM trellos WHERE id = $1")
        .bind(trello_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Every list of the board with its cards
pub async fn board_lists(pool: &SqlitePool, trello_id: i64) -> Result<Vec<ListView>, sqlx::Error> {
    let lists = sqlx::query_as::<_, TrelloList>(
        "SELECT id, name, position, trello_id FROM trello_lists WHERE trello_id = $1 ORDER BY position",
    )
    .bind(trello_id)
    .fetch_all(pool)
    .await?;

    let cards = sqlx::query_as::<_, Card>(&format!(
        "{CARD_SELECT} JOIN trello_lists l ON l.id = c.list_id WHERE l.trello_id = $1 ORDER BY c.position"
    ))
    .bind(trello_id)
    .fetch_all(pool)
    .await?;
    let mut by_list: HashMap<i64, Vec<Card>> = HashMap::new();
    for card in with_assignees(pool, cards).await? {
        by_list.entry(card.list_id).or_default().push(card);
    }

    Ok(lists
        .into_iter()
        .map(|list| {
            let cards = by_list.remove(&list.id).unwrap_or_default();
            ListView { list, cards }
        })
        .collect())
}

/// The list, if it belongs to the board
pub async fn find_list(
    pool: &SqlitePool,
    trello_id: i64,
    list_id: i64,
) -> Result<Option<TrelloList>, sqlx::Error> {
    sqlx::query_as::<_, TrelloList>(
        "SELECT id, name, position, trello_id FROM trello_lists WHERE id = $1 AND trello_id = $2",
    )
    .bind(list_id)
    .bind(trello_id)
    .fetch_optional(pool)
    .await
}

/// Append a list at the end of the board
pub async fn create_list(pool: &SqlitePool, trello_id: i64, name: &str) -> Result<TrelloList, sqlx::Error> {
    sqlx::query_as::<_, TrelloList>(&format!(
        "INSERT INTO trello_lists (name, trello_id, position) VALUES ($1, $2, {}) RETURNING id, name, position, trello_id",
        ordering::next_position_expr::<TrelloLists>(2)
    ))
    .bind(name)
    .bind(trello_id)
    .fetch_one(pool)
    .await
}

pub async fn rename_list(pool: &SqlitePool, list_id: i64, name: &str) -> Result<TrelloList, sqlx::Error> {
    sqlx::query_as::<_, TrelloList>(
        "UPDATE trello_lists SET name = $1 WHERE id = $2 RETURNING id, name, position, trello_id",
    )
    .bind(name)
    .bind(list_id)
    .fetch_one(pool)
    .await
}

/// The card, if it currently sits in the list
pub async fn find_card(
    pool: &SqlitePool,
    list_id: i64,
    card_id: i64,
) -> Result<Option<Card>, sqlx::Error> {
    let card = sqlx::query_as::<_, Card>(&format!("{CARD_SELECT} WHERE c.id = $1 AND c.list_id = $2"))
        .bind(card_id)
        .bind(list_id)
        .fetch_optional(pool)
        .await?;

    match card {
        Some(card) => Ok(with_assignees(pool, vec![card]).await?.pop()),
        None => Ok(None),
    }
}

/// Append a card at the end of the list together with its assignees
pub async fn create_card(
    pool: &SqlitePool,
    list_id: i64,
    name: &str,
    description: &str,
    real_date: NaiveDate,
    user_ids: &[i64],
) -> Result<i64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let card_id: i64 = sqlx::query_scalar(&format!(
        r#"
        INSERT INTO trello_cards (name, list_id, description, real_date, position)
        VALUES ($1, $2, $3, $4, {})
        RETURNING id
        "#,
        ordering::next_position_expr::<TrelloCards>(2)
    ))
    .bind(name)
    .bind(list_id)
    .bind(description)
    .bind(real_date)
    .fetch_one(&mut *tx)
    .await?;

    for user_id in user_ids {
        sqlx::query("INSERT OR IGNORE INTO trello_card_users (card_id, user_id) VALUES ($1, $2)")
            .bind(card_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(card_id)
}

pub async fn update_card(
    pool: &SqlitePool,
    card_id: i64,
    name: Option<&str>,
    description: Option<&str>,
    real_date: Option<NaiveDate>,
    user_ids: Option<&[i64]>,
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        UPDATE trello_cards
        SET name = COALESCE($1, name),
            description = COALESCE($2, description),
            real_date = COALESCE($3, real_date)
        WHERE id = $4
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(real_date)
    .bind(card_id)
    .execute(&mut *tx)
    .await?;

    if let Some(user_ids) = user_ids {
        sqlx::query("DELETE FROM trello_card_users WHERE card_id = $1")
            .bind(card_id)
            .execute(&mut *tx)
            .await?;
        for user_id in user_ids {
            sqlx::query("INSERT OR IGNORE INTO trello_card_users (card_id, user_id) VALUES ($1, $2)")
                .bind(card_id)
                .bind(user_id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;
    Ok(())
}

pub async fn mark_card_realised(
    pool: &SqlitePool,
    card_id: i64,
    realisator_id: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE trello_cards SET realised = 1, statut_id = $1, realisator_id = $2 WHERE id = $3")
        .bind(Statut::COMPLETED)
        .bind(realisator_id)
        .bind(card_id)
        .execute(pool)
        .await?;
    Ok(())
}

async fn with_assignees(pool: &SqlitePool, mut cards: Vec<Card>) -> Result<Vec<Card>, sqlx::Error> {
    if cards.is_empty() {
        return Ok(cards);
    }

    let mut query = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
        r#"
        SELECT cu.card_id, u.id, u.name, u.first_name
        FROM trello_card_users cu
        JOIN users u ON u.id = cu.user_id
        WHERE cu.card_id IN (
        "#,
    );
    let mut ids = query.separated(", ");
    for card in &cards {
        ids.push_bind(card.id);
    }
    ids.push_unseparated(") ORDER BY u.id");

    let rows: Vec<(i64, i64, String, String)> = query.build_query_as().fetch_all(pool).await?;

    let mut assignees: HashMap<i64, Vec<Assignee>> = HashMap::new();
    for (card_id, id, name, first_name) in rows {
        assignees.entry(card_id).or_default().push(Assignee {
            id,
            name,
            first_name,
        });
    }
    for card in &mut cards {
        card.users = assignees.remove(&card.id).unwrap_or_default();
    }
    Ok(cards)
}
