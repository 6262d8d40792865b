//! Audio upload service
//!
//! Orchestrates the gatekeeper workflow: extract → validate → sanitize →
//! stage. No network call happens before a file is accepted.

use std::sync::Arc;

use axum::extract::Multipart;
use minuta_core::{sanitize_filename, AppError, ValidationError};

use crate::state::AppState;

use super::staging::StagedAudio;
use super::types::ValidatedAudio;

/// Multipart form field carrying the audio file
const AUDIO_FIELD: &str = "audio";

pub struct AudioUploadService {
    state: Arc<AppState>,
}

impl AudioUploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Complete gatekeeper workflow.
    ///
    /// Returns the validated file and its staged copy; the staged copy
    /// removes itself on drop unless released explicitly.
    pub async fn accept(
        &self,
        multipart: Multipart,
    ) -> Result<(ValidatedAudio, StagedAudio), AppError> {
        let validated = self.extract_and_validate(multipart).await?;

        tracing::info!(
            filename = %validated.safe_filename,
            size_bytes = validated.size(),
            extension = %validated.extension,
            "Upload accepted"
        );

        let staged = StagedAudio::stage(
            &self.state.upload.staging_dir,
            &validated.extension,
            &validated.data,
        )
        .await?;

        Ok((validated, staged))
    }

    /// Extract the audio field from the multipart request and run the policy checks
    async fn extract_and_validate(
        &self,
        multipart: Multipart,
    ) -> Result<ValidatedAudio, AppError> {
        let (data, original_filename, content_type) = extract_multipart_audio(multipart).await?;

        let validator = &self.state.upload.validator;
        let extension =
            validator.validate(&original_filename, content_type.as_deref(), data.len())?;
        let safe_filename = sanitize_filename(&original_filename)?;

        Ok(ValidatedAudio {
            data,
            original_filename,
            safe_filename,
            content_type,
            extension,
        })
    }
}

/// Extract file data, filename, and content type from the multipart form.
/// Only one field named "audio" is accepted; multiple audio fields are rejected.
async fn extract_multipart_audio(
    mut multipart: Multipart,
) -> Result<(Vec<u8>, String, Option<String>), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if field_name == AUDIO_FIELD {
            if file_data.is_some() {
                return Err(AppError::InvalidInput(
                    "Multiple audio fields are not allowed; send exactly one field named 'audio'"
                        .to_string(),
                ));
            }
            filename = field.file_name().map(|s: &str| s.to_string());
            content_type = field.content_type().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            file_data = Some(data.to_vec());
        }
    }

    let file_data = file_data.ok_or(ValidationError::NoFileProvided)?;

    let original_filename = match filename {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ValidationError::NoFileProvided.into()),
    };

    Ok((file_data, original_filename, content_type))
}
