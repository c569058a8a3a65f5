/**
 * Server Configuration
 *
 * Configuration is read once at startup from environment variables (after
 * `.env` has been loaded by the binary). Every value has a development
 * default; malformed numbers fall back to the default with a warning.
 *
 * | variable         | default                        |
 * |------------------|--------------------------------|
 * | `DATABASE_URL`   | `sqlite://planhub.db?mode=rwc` |
 * | `JWT_SECRET`     | development secret (warned)    |
 * | `SERVER_PORT`    | `3000`                         |
 * | `UPLOAD_DIR`     | `uploads`                      |
 * | `BCRYPT_COST`    | `bcrypt::DEFAULT_COST`         |
 * | `TOKEN_TTL_DAYS` | `30`                           |
 */

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const DEFAULT_DATABASE_URL: &str = "sqlite://planhub.db?mode=rwc";
const DEV_JWT_SECRET: &str = "planhub-development-secret-change-me";

/// Runtime configuration of the server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// TCP port to listen on
    pub port: u16,
    /// Directory profile photos are written to
    pub upload_dir: PathBuf,
    /// bcrypt cost used when hashing passwords
    pub bcrypt_cost: u32,
    /// Lifetime of issued tokens, in days
    pub token_ttl_days: i64,
}

impl ServerConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using the development secret");
            DEV_JWT_SECRET.to_string()
        });

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));

        Self {
            database_url,
            jwt_secret,
            port: env_number("SERVER_PORT", 3000),
            upload_dir,
            bcrypt_cost: env_number("BCRYPT_COST", bcrypt::DEFAULT_COST),
            token_ttl_days: env_number("TOKEN_TTL_DAYS", 30),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            port: 3000,
            upload_dir: PathBuf::from("uploads"),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            token_ttl_days: 30,
        }
    }
}

fn env_number<T: FromStr + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("{} has invalid value {:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

/// Create the connection pool and bring the schema up to date
///
/// This function:
/// 1. Parses `url` (the file is created when missing)
/// 2. Opens a SQLite pool
/// 3. Runs the embedded migrations
///
/// Unlike a best-effort startup, a database that cannot be opened or migrated
/// is fatal: every endpoint needs it.
pub async fn connect_database(url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::info!("Database connection pool created successfully");
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Run the embedded migrations against an open pool
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
