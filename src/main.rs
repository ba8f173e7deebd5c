use std::sync::Arc;

use bookmarks_api::app::{app, AppState};
use bookmarks_api::config::AppConfig;
use bookmarks_api::database::PgBookmarkStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up API_TOKEN and DATABASE_URL.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;
    tracing::info!("starting bookmarks API in {:?} mode", config.environment);

    let store = Arc::new(PgBookmarkStore::connect(&config).await?);

    let bind_addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{bind_addr}");

    let state = AppState::new(config, store);
    axum::serve(listener, app(state)).await?;

    Ok(())
}
