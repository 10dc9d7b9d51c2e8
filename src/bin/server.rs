//! Tupulung HTTP server
//!
//! Reads configuration from defaults, an optional YAML file, `.env` and the
//! environment, then serves the API. Storage is in-memory unless the crate
//! is built with the `mysql` feature.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tupulung::config::AppConfig;
use tupulung::server::{AppState, build_router};
use tupulung::services::Stores;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tupulung=info,tower_http=info")),
        )
        .init();

    let config = Arc::new(AppConfig::load()?);
    if config.uses_development_secret() {
        tracing::warn!("JWT_SECRET is not set, signing tokens with the development secret");
    }

    let stores = open_stores(&config).await?;
    let app = build_router(AppState::new(config.clone(), stores));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    tracing::info!(%address, base_url = %config.app.base_url, "tupulung listening");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "mysql"))]
async fn open_stores(_config: &AppConfig) -> Result<Stores> {
    tracing::info!("using in-memory storage");
    Ok(Stores::in_memory())
}

#[cfg(feature = "mysql")]
async fn open_stores(config: &AppConfig) -> Result<Stores> {
    let pool = sqlx::mysql::MySqlPoolOptions::new()
        .max_connections(10)
        .connect_with(config.connect_options())
        .await
        .with_context(|| {
            format!(
                "failed to connect to MySQL at {}:{}",
                config.database.host, config.database.port
            )
        })?;

    tupulung::storage::ensure_schema(&pool).await?;
    tracing::info!(database = %config.database.name, "using MySQL storage");

    Ok(Stores::mysql(pool))
}
