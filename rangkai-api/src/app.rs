/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use rangkai_api::{app::AppState, config::Config};
/// use rangkai_shared::db::{DbPool, PoolSettings};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = DbPool::init(&config.database, PoolSettings::default()).await?;
/// let state = AppState::new(pool, config);
/// let app = rangkai_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use crate::routes;
use axum::{routing::get, Router};
use rangkai_shared::db::DbPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DbPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: DbPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the Axum router
///
/// ```text
/// /
/// ├── GET /               # Welcome message
/// ├── GET /health         # Health check
/// └── GET /health/ready   # Readiness check
/// ```
///
/// Unknown paths get a JSON 404. Every request is logged by tower-http's
/// `TraceLayer`.
pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/health/ready", get(routes::health::readiness));

    Router::new()
        .route("/", get(routes::root::index))
        .merge(health_routes)
        .fallback(routes::root::not_found)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
