//! Application state and sub-state extractors.
//!
//! AppState is split into sub-states so handlers can extract only what they
//! need via Axum's `FromRef`, instead of reaching through a single god object.

use minuta_core::{Config, UploadValidator};
use minuta_services::{Summarizer, Transcriber};
use std::path::PathBuf;
use std::sync::Arc;

/// Upload policy and staging location for incoming audio files.
#[derive(Clone)]
pub struct UploadConfig {
    pub staging_dir: PathBuf,
    pub validator: UploadValidator,
}

/// Upstream provider clients.
#[derive(Clone)]
pub struct ProviderState {
    pub transcriber: Arc<dyn Transcriber>,
    pub summarizer: Arc<dyn Summarizer>,
}

// ----- AppState -----

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub upload: UploadConfig,
    pub providers: ProviderState,
    pub is_production: bool,
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for UploadConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.upload.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for ProviderState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.providers.clone()
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    assert_send::<AppState>();
    assert_sync::<AppState>();
}
