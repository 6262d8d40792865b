//! Audio upload handler: the one request/response round trip of the system.

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::AudioUploadService;
use crate::state::AppState;
use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use minuta_core::models::UploadResponse;
use minuta_core::{mime_type_for_extension, normalize_summary, word_count, AppError};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    responses(
        (status = 200, description = "Audio transcribed and summarized", body = UploadResponse),
        (status = 400, description = "Upload rejected by validation", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 502, description = "Upstream provider failure", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart), fields(operation = "upload_audio"))]
pub async fn upload_audio(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let service = AudioUploadService::new(&state);

    // Gatekeeper: no provider call happens before the file is accepted. The
    // staged copy cleans itself up on every exit path below, including `?`.
    let (validated, staged) = service.accept(multipart).await?;

    let mime_type = mime_type_for_extension(&validated.extension);
    let audio = Bytes::from(validated.data);

    let transcript = state
        .providers
        .transcriber
        .transcribe(audio, mime_type)
        .await
        .map_err(|e| {
            tracing::warn!(error = format!("{:#}", e), "Transcription provider failed");
            AppError::Transcription(format!("{:#}", e))
        })?;

    let transcript_words = word_count(&transcript);
    tracing::info!(word_count = transcript_words, "Transcription completed");

    let raw_summary = state
        .providers
        .summarizer
        .summarize(&transcript)
        .await
        .map_err(|e| {
            tracing::warn!(error = format!("{:#}", e), "Summarization provider failed");
            AppError::Summarization(format!("{:#}", e))
        })?;

    // Malformed content is not an error: the normalizer guarantees a
    // well-formed result whatever the model returned.
    let summary = normalize_summary(&raw_summary);

    staged.remove().await;

    tracing::info!(
        filename = %validated.safe_filename,
        word_count = transcript_words,
        decisions = summary.meeting_metrics.total_decisions,
        action_items = summary.meeting_metrics.total_action_items,
        "Processing completed"
    );

    Ok(Json(UploadResponse::new(
        transcript,
        transcript_words,
        summary,
        validated.safe_filename,
    )))
}
