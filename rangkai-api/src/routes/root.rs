/// Welcome endpoint
///
/// # Endpoint
///
/// ```text
/// GET /
/// ```
///
/// # Response
///
/// ```json
/// {
///   "message": "Welcome to Rangkai Edu Backend API"
/// }
/// ```

use crate::error::ApiError;
use axum::{http::Uri, Json};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "Welcome to Rangkai Edu Backend API";

/// Welcome response
#[derive(Debug, Serialize, Deserialize)]
pub struct WelcomeResponse {
    pub message: String,
}

/// Returns the fixed welcome message
pub async fn index() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
