use axum::{Json, http::Uri, response::IntoResponse};

use crate::error::ApiError;
use crate::models::HealthResponse;

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
