//! Gemini provider client tests
//!
//! These run against a local mock of the generateContent endpoint; no network
//! access or API key is required.

use std::time::Duration;

use bytes::Bytes;
use minuta_services::{GeminiService, Summarizer, Transcriber};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> GeminiService {
    GeminiService::new(
        "test-key".to_string(),
        server.uri(),
        "transcribe-model".to_string(),
        "summary-model".to_string(),
        Duration::from_secs(5),
    )
}

fn candidate_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {
                "parts": [{ "text": text }]
            }
        }]
    }))
}

#[tokio::test]
async fn transcribe_returns_candidate_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/transcribe-model:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(candidate_response("We decided to launch Friday."))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let transcript = service
        .transcribe(Bytes::from_static(b"fake audio"), "audio/mpeg")
        .await
        .expect("transcription should succeed");

    assert_eq!(transcript, "We decided to launch Friday.");
}

#[tokio::test]
async fn transcribe_sends_inline_audio_with_mime_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/transcribe-model:generateContent"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [{ "inlineData": { "mimeType": "audio/flac" } }]
            }]
        })))
        .respond_with(candidate_response("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    service
        .transcribe(Bytes::from_static(b"flac bytes"), "audio/flac")
        .await
        .expect("transcription should succeed");
}

#[tokio::test]
async fn summarize_uses_summary_model_and_returns_raw_text() {
    let server = MockServer::start().await;
    let raw = r#"{"summary": "Sync.", "key_decisions": ["Ship"]}"#;

    Mock::given(method("POST"))
        .and(path("/models/summary-model:generateContent"))
        .respond_with(candidate_response(raw))
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server);
    let text = service
        .summarize("We decided to ship.")
        .await
        .expect("summarization should succeed");

    // The provider returns the model output verbatim; shaping is the
    // normalizer's concern.
    assert_eq!(text, raw);
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = service
        .transcribe(Bytes::from_static(b"audio"), "audio/wav")
        .await
        .expect_err("500 should surface as an error");

    assert!(format!("{:#}", err).contains("500"));
}

#[tokio::test]
async fn api_error_in_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": { "message": "API key not valid" }
        })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    let err = service
        .summarize("transcript")
        .await
        .expect_err("body-level error should surface");

    assert!(format!("{:#}", err).contains("API key not valid"));
}

#[tokio::test]
async fn empty_candidates_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert!(service.summarize("transcript").await.is_err());
}

#[tokio::test]
async fn whitespace_only_content_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(candidate_response("   \n  "))
        .mount(&server)
        .await;

    let service = service_for(&server);
    assert!(service
        .transcribe(Bytes::from_static(b"audio"), "audio/mpeg")
        .await
        .is_err());
}
