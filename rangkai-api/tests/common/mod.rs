/// Common test utilities for integration tests
///
/// Builds the router around a lazily connected pool that points at a port
/// nothing listens on, so routes can be exercised without PostgreSQL.

use rangkai_api::app::{build_router, AppState};
use rangkai_api::config::{ApiConfig, AppEnv, Config, LogFormat};
use rangkai_shared::config::{DbConfig, DbDefaults};
use rangkai_shared::db::{DbPool, PoolSettings};

/// Test context containing the router and its pool
pub struct TestContext {
    pub db: DbPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context whose database is unreachable
    pub fn unreachable_db() -> Self {
        let database = DbConfig::resolve(
            |key| match key {
                "DB_HOST" => Some("127.0.0.1".to_string()),
                "DB_PORT" => Some("1".to_string()),
                _ => None,
            },
            &DbDefaults::development(),
        )
        .expect("Failed to build database config");

        let settings = PoolSettings {
            max_connections: 1,
            min_connections: 0,
            acquire_timeout_seconds: 1,
            ..Default::default()
        };
        let db = DbPool::connect_lazy(&database, settings).expect("Failed to build pool");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: AppEnv::Development,
                log_format: LogFormat::Pretty,
            },
            database,
        };

        let app = build_router(AppState::new(db.clone(), config));

        TestContext { db, app }
    }

    /// Closes the pool
    pub async fn cleanup(&self) {
        self.db.close().await;
    }
}

/// Reads a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Body is not JSON")
}
