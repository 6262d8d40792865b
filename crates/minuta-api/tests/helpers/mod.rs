//! Shared test harness: an in-process app wired to a mock Gemini endpoint.
#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use minuta_core::{BaseConfig, Config, SummarizerConfig};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TRANSCRIBE_PATH: &str = "/models/transcribe-model:generateContent";
pub const SUMMARY_PATH: &str = "/models/summary-model:generateContent";

pub struct TestApp {
    pub server: TestServer,
    pub staging: TempDir,
    pub gemini: MockServer,
}

impl TestApp {
    /// Number of files currently staged; zero after any completed request.
    pub fn staged_file_count(&self) -> usize {
        std::fs::read_dir(self.staging.path())
            .expect("read staging dir")
            .count()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_limit(25 * 1024 * 1024).await
}

pub async fn spawn_app_with_limit(max_audio_size_bytes: usize) -> TestApp {
    let gemini = MockServer::start().await;
    let staging = tempfile::tempdir().expect("create staging dir");

    let config = Config(Box::new(SummarizerConfig {
        base: BaseConfig {
            server_port: 0,
            cors_origins: vec!["*".to_string()],
            environment: "test".to_string(),
        },
        upload_dir: staging.path().to_string_lossy().into_owned(),
        max_audio_size_bytes,
        audio_allowed_extensions: vec![
            "mp3".to_string(),
            "wav".to_string(),
            "m4a".to_string(),
            "flac".to_string(),
        ],
        audio_allowed_content_types: vec![
            "audio/mpeg".to_string(),
            "audio/mp4".to_string(),
            "audio/x-m4a".to_string(),
            "audio/wav".to_string(),
            "audio/flac".to_string(),
        ],
        gemini_api_key: "test-key".to_string(),
        gemini_api_base: gemini.uri(),
        transcription_model: "transcribe-model".to_string(),
        summary_model: "summary-model".to_string(),
        provider_timeout_secs: 5,
    }));

    let (_state, router) = minuta_api::setup::initialize_app(config)
        .await
        .expect("initialize app");
    let server = TestServer::new(router).expect("start test server");

    TestApp {
        server,
        staging,
        gemini,
    }
}

/// Multipart form with a single `audio` field
pub fn audio_form(filename: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    MultipartForm::new().add_part(
        "audio",
        Part::bytes(data).file_name(filename).mime_type(mime_type),
    )
}

/// generateContent response with a single text candidate
pub fn candidate_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }]
            }
        }]
    }))
}

pub async fn mock_transcription(gemini: &MockServer, transcript: &str) {
    Mock::given(method("POST"))
        .and(path(TRANSCRIBE_PATH))
        .respond_with(candidate_response(transcript))
        .mount(gemini)
        .await;
}

pub async fn mock_summary(gemini: &MockServer, raw: &str) {
    Mock::given(method("POST"))
        .and(path(SUMMARY_PATH))
        .respond_with(candidate_response(raw))
        .mount(gemini)
        .await;
}

pub async fn mock_transcription_failure(gemini: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(TRANSCRIBE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("provider unavailable"))
        .mount(gemini)
        .await;
}

pub async fn mock_summary_failure(gemini: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(SUMMARY_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_string("provider unavailable"))
        .mount(gemini)
        .await;
}
