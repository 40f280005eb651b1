/// Health check endpoints
///
/// # Endpoints
///
/// ```text
/// GET /health         # always 200, reports database connectivity
/// GET /health/ready   # 200 when the database answers a ping, 503 otherwise
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,
}

/// Readiness response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub status: String,
}

/// Health check handler
///
/// Returns "healthy" when `SELECT 1` succeeds and "degraded" otherwise. The
/// status code is 200 either way.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_status = match state.db.health_check().await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };

    Json(HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database_status.to_string(),
    })
}

/// Readiness handler
///
/// Fails with 503 when the database cannot be reached.
pub async fn readiness(State(state): State<AppState>) -> ApiResult<Json<ReadyResponse>> {
    state.db.ping().await?;

    Ok(Json(ReadyResponse {
        status: "ready".to_string(),
    }))
}
