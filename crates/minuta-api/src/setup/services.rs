//! Provider client and state construction

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use minuta_core::{Config, UploadValidator};
use minuta_services::GeminiService;

use crate::state::{AppState, ProviderState, UploadConfig};

/// Build the application state: upload policy, staging location, and the
/// upstream provider clients.
pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let validator = UploadValidator::new(
        config.max_audio_size_bytes(),
        config.audio_allowed_extensions().to_vec(),
        config.audio_allowed_content_types().to_vec(),
    );

    let gemini = GeminiService::new(
        config.gemini_api_key().to_string(),
        config.gemini_api_base().to_string(),
        config.transcription_model().to_string(),
        config.summary_model().to_string(),
        Duration::from_secs(config.provider_timeout_secs()),
    );

    tracing::info!(
        transcription_model = %config.transcription_model(),
        summary_model = %config.summary_model(),
        "Gemini provider configured"
    );

    let gemini = Arc::new(gemini);

    let state = AppState {
        config: config.clone(),
        upload: UploadConfig {
            staging_dir: PathBuf::from(config.upload_dir()),
            validator,
        },
        providers: ProviderState {
            transcriber: gemini.clone(),
            summarizer: gemini,
        },
        is_production: config.is_production(),
    };

    Ok(Arc::new(state))
}
