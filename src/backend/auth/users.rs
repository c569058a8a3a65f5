/**
 * User Model and Database Operations
 *
 * E-mail addresses are stored normalised (see `shared::normalize_email`);
 * callers normalise before lookup.
 */

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

/// User row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// Normalised e-mail address
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Family name
    pub name: String,
    /// Given name
    pub first_name: String,
    /// Public URL of the profile photo
    pub photo: Option<String>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// User as returned to clients, without the password hash
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub photo: Option<String>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            first_name: user.first_name,
            photo: user.photo,
        }
    }
}

/// Fields for a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub first_name: String,
    pub photo: Option<String>,
}

/// Optional profile changes; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.password_hash.is_none()
            && self.name.is_none()
            && self.first_name.is_none()
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, name, first_name, photo, created_at";

/// Create a new user
pub async fn create_user(pool: &SqlitePool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (email, password_hash, name, first_name, photo, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(&new_user.email)
    .bind(&new_user.password_hash)
    .bind(&new_user.name)
    .bind(&new_user.first_name)
    .bind(&new_user.photo)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user_by_id(pool: &SqlitePool, id: i64) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Apply profile changes and return the updated row
pub async fn update_user(
    pool: &SqlitePool,
    id: i64,
    changes: UserChanges,
) -> Result<User, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET email = COALESCE($1, email),
            password_hash = COALESCE($2, password_hash),
            name = COALESCE($3, name),
            first_name = COALESCE($4, first_name)
        WHERE id = $5
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(changes.email)
    .bind(changes.password_hash)
    .bind(changes.name)
    .bind(changes.first_name)
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Whether `email` belongs to an account other than `except_id`
pub async fn email_taken(
    pool: &SqlitePool,
    email: &str,
    except_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    let taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 AND id != COALESCE($2, -1))",
    )
    .bind(email)
    .bind(except_id)
    .fetch_one(pool)
    .await?;

    Ok(taken)
}
