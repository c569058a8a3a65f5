//! Vault persistence, always scoped by owner

use sqlx::SqlitePool;

use super::VaultEntry;

const ENTRY_COLUMNS: &str = "id, site_name, username, password, iv, user_id";

pub async fn list_entries(pool: &SqlitePool, user_id: i64) -> Result<Vec<VaultEntry>, sqlx::Error> {
    sqlx::query_as::<_, VaultEntry>(&format!(
        "SELECT {ENTRY_COLUMNS} FROM vault_passwords WHERE user_id = $1 ORDER BY id"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create_entry(
    pool: &SqlitePool,
    user_id: i64,
    site_name: &str,
    username: &str,
    password: &str,
    iv: &str,
) -> Result<VaultEntry, sqlx::Error> {
    sqlx::query_as::<_, VaultEntry>(&format!(
        r#"
        INSERT INTO vault_passwords (site_name, username, password, iv, user_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(site_name)
    .bind(username)
    .bind(password)
    .bind(iv)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn update_entry(
    pool: &SqlitePool,
    user_id: i64,
    entry_id: i64,
    site_name: Option<&str>,
    username: Option<&str>,
    password: Option<&str>,
    iv: Option<&str>,
) -> Result<Option<VaultEntry>, sqlx::Error> {
    sqlx::query_as::<_, VaultEntry>(&format!(
        r#"
        UPDATE vault_passwords
        SET site_name = COALESCE($1, site_name),
            username = COALESCE($2, username),
            password = COALESCE($3, password),
            iv = COALESCE($4, iv)
        WHERE id = $5 AND user_id = $6
        RETURNING {ENTRY_COLUMNS}
        "#
    ))
    .bind(site_name)
    .bind(username)
    .bind(password)
    .bind(iv)
    .bind(entry_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete_entry(pool: &SqlitePool, user_id: i64, entry_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM vault_passwords WHERE id = $1 AND user_id = $2")
        .bind(entry_id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
