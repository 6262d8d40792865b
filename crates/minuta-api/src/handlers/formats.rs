//! Supported upload formats endpoint

use crate::state::UploadConfig;
use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct SupportedFormatsResponse {
    pub formats: Vec<String>,
    pub max_file_size_bytes: usize,
    pub max_file_size_mb: usize,
}

#[utoipa::path(
    get,
    path = "/api/supported-formats",
    tag = "upload",
    responses(
        (status = 200, description = "Accepted audio formats and size limit", body = SupportedFormatsResponse)
    )
)]
pub async fn supported_formats(State(upload): State<UploadConfig>) -> Json<SupportedFormatsResponse> {
    let validator = &upload.validator;
    Json(SupportedFormatsResponse {
        formats: validator.allowed_extensions().to_vec(),
        max_file_size_bytes: validator.max_file_size(),
        max_file_size_mb: validator.max_file_size() / 1024 / 1024,
    })
}
