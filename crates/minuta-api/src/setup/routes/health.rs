//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: String,
    pub services: ServiceStatus,
    pub supported_formats: Vec<String>,
    pub max_file_size_mb: usize,
    pub timestamp: chrono::DateTime<Utc>,
}

#[derive(serde::Serialize)]
pub(super) struct ServiceStatus {
    pub gemini: String,
    pub backend: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Full health check: backend liveness plus provider configuration state.
///
/// No upstream request is made here; a health probe must stay cheap and must
/// not burn provider quota.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let gemini = if state.config.gemini_api_key().trim().is_empty() {
        "not_configured".to_string()
    } else {
        "configured".to_string()
    };

    let response = HealthCheckResponse {
        status: "healthy".to_string(),
        services: ServiceStatus {
            gemini,
            backend: "running".to_string(),
        },
        supported_formats: state.upload.validator.allowed_extensions().to_vec(),
        max_file_size_mb: state.upload.validator.max_file_size() / 1024 / 1024,
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response))
}
