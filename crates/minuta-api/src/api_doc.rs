//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use minuta_core::models;

/// Returns the OpenAPI spec.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Minuta API",
        version = "0.1.0",
        description = "Meeting audio summarizer API: upload a recording, get back the transcript and a structured meeting summary."
    ),
    paths(
        handlers::upload::upload_audio,
        handlers::formats::supported_formats,
    ),
    components(schemas(
        models::UploadResponse,
        models::MeetingSummary,
        models::ActionItem,
        models::MeetingMetrics,
        handlers::formats::SupportedFormatsResponse,
        error::ErrorResponse,
    )),
    tags(
        (name = "upload", description = "Audio upload and processing")
    )
)]
struct ApiDoc;
