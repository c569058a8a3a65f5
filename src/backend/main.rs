/**
 * planhub Server Entry Point
 *
 * Loads `.env`, sets up tracing, opens the database and serves the API.
 */

use planhub::backend::server::{create_app, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = ServerConfig::from_env();
    let port = config.port;
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let app = create_app(config).await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
