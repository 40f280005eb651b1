//! # Rangkai Edu API Server
//!
//! Loads configuration, opens the PostgreSQL connection pool and serves the
//! HTTP API. Any startup failure (bad configuration, unreachable database)
//! aborts the process with a non-zero exit code.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p rangkai-api
//! ```

use anyhow::Context;
use rangkai_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat},
};
use rangkai_shared::db::{DbPool, PoolSettings};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env once, before logging starts, so RUST_LOG and LOG_FORMAT apply
    let env_file = load_env_file()?;
    init_tracing(LogFormat::from_env());

    tracing::info!(
        "Rangkai Edu API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    match env_file {
        Some(path) => tracing::info!(path = %path.display(), "Loaded .env file"),
        None => tracing::info!("No .env file found"),
    }

    let config = Config::from_env()?;
    tracing::info!(
        environment = ?config.api.environment,
        database = %config.database.redacted_dsn(),
        "Configuration loaded"
    );

    let pool = DbPool::init(&config.database, PoolSettings::default())
        .await
        .context("Failed to initialize database connection pool")?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(pool.clone(), config));

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Loads `.env` into the process environment without overriding variables
/// that are already set. A missing file is fine; a malformed one is not.
fn load_env_file() -> anyhow::Result<Option<PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(anyhow::Error::new(err).context("Failed to load .env file")),
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "rangkai_api=debug,rangkai_shared=debug,tower_http=debug".into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
