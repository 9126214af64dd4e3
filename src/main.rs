use std::sync::Arc;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::settings::AppConfig;
use crate::infrastructure::inference::replicate::ReplicateService;
use crate::infrastructure::storage::s3::StorageService;
use crate::state::AppState;

mod app;
mod config;
mod docs;
mod error;
mod infrastructure;
mod modules;
mod routes;
mod state;

#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Starting server...");

    let config = AppConfig::new().context("Missing required environment variables")?;

    let storage = StorageService::new(
        &config.minio_endpoint,
        &config.minio_access_key,
        &config.minio_secret_key,
    )?;

    let separator = ReplicateService::new(
        &config.replicate_api_url,
        &config.replicate_api_token,
        &config.replicate_model,
        &config.replicate_stems,
    )?;

    let port = config.server_port;
    let state = AppState::new(config, Arc::new(storage), Arc::new(separator));

    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Server running on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}
