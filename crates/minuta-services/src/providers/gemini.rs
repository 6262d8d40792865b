//! Google Gemini provider.
//!
//! Both upstream calls go through the `generateContent` endpoint: audio is
//! sent inline (base64) for transcription, and the transcript is sent with a
//! fixed instruction template for summarization.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{Summarizer, Transcriber};

const TRANSCRIPTION_INSTRUCTION: &str = "You are a meeting transcription assistant. \
    Transcribe the attached audio recording. Return only the spoken words as plain text, \
    with normal punctuation and no speaker labels, timestamps, or commentary.";

// Request/response types for the generateContent API

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Gemini-backed transcription and summarization client
#[derive(Clone)]
pub struct GeminiService {
    api_key: String,
    api_base: String,
    transcription_model: String,
    summary_model: String,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(
        api_key: String,
        api_base: String,
        transcription_model: String,
        summary_model: String,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            api_key,
            api_base,
            transcription_model,
            summary_model,
            client,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base.trim_end_matches('/'),
            model,
            self.api_key
        )
    }

    /// Fixed instruction template for meeting summarization
    fn summary_prompt(transcript: &str) -> String {
        format!(
            "Analyze this meeting transcript and provide structured output:\n\n\
             TRANSCRIPT:\n{}\n\n\
             Provide JSON with:\n\
             - summary: brief overview\n\
             - key_decisions: list of decisions\n\
             - action_items: list with task, owner, deadline, priority\n\
             - next_steps: list of next steps\n\
             - meeting_metrics: total_decisions, total_action_items, key_topics\n\n\
             Be specific and extract real content from the transcript.",
            transcript
        )
    }

    async fn call_generate(&self, model: &str, body: GenerateContentRequest) -> Result<String> {
        let response = self
            .client
            .post(self.generate_url(model))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Failed to send generateContent request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Gemini generateContent failed with status {}: {}",
                status,
                error_text
            ));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse generateContent response")?;

        if let Some(error) = parsed.error {
            return Err(anyhow!("Gemini API error: {}", error.message));
        }

        let text =
            Self::extract_text(&parsed).ok_or_else(|| anyhow!("Gemini returned no content"))?;

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Gemini returned empty content"));
        }

        Ok(trimmed.to_string())
    }

    /// Join the text parts of the first candidate
    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        let parts: Vec<&str> = response
            .candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(""))
        }
    }

    fn transcription_request(audio: &Bytes, mime_type: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: mime_type.to_string(),
                        data: STANDARD.encode(audio),
                    }),
                }],
            }],
            system_instruction: Some(SystemInstruction {
                parts: vec![TextPart {
                    text: TRANSCRIPTION_INSTRUCTION.to_string(),
                }],
            }),
        }
    }

    fn summary_request(transcript: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: Some(Self::summary_prompt(transcript)),
                    inline_data: None,
                }],
            }],
            system_instruction: None,
        }
    }
}

#[async_trait]
impl Transcriber for GeminiService {
    async fn transcribe(&self, audio: Bytes, mime_type: &str) -> Result<String> {
        tracing::debug!(
            audio_size = audio.len(),
            mime_type = %mime_type,
            model = %self.transcription_model,
            "Sending audio for transcription"
        );

        let body = Self::transcription_request(&audio, mime_type);
        let transcript = self
            .call_generate(&self.transcription_model, body)
            .await
            .context("Transcription request failed")?;

        tracing::info!(
            transcript_chars = transcript.len(),
            "Transcription completed"
        );

        Ok(transcript)
    }
}

#[async_trait]
impl Summarizer for GeminiService {
    async fn summarize(&self, transcript: &str) -> Result<String> {
        tracing::debug!(
            transcript_chars = transcript.len(),
            model = %self.summary_model,
            "Requesting meeting summary"
        );

        let body = Self::summary_request(transcript);
        let raw = self
            .call_generate(&self.summary_model, body)
            .await
            .context("Summarization request failed")?;

        tracing::info!(raw_chars = raw.len(), "Summarization completed");

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> GeminiService {
        GeminiService::new(
            "test-api-key".to_string(),
            "https://example.test/v1beta".to_string(),
            "transcribe-model".to_string(),
            "summary-model".to_string(),
            Duration::from_secs(5),
        )
    }

    #[test]
    fn generate_url_contains_model_and_key() {
        let service = test_service();
        let url = service.generate_url("transcribe-model");

        assert!(url.contains("transcribe-model"));
        assert!(url.contains("test-api-key"));
        assert!(url.contains("generateContent"));
    }

    #[test]
    fn transcription_request_carries_inline_audio() {
        let request =
            GeminiService::transcription_request(&Bytes::from_static(b"abc"), "audio/mpeg");

        assert_eq!(request.contents.len(), 1);
        assert_eq!(request.contents[0].role, "user");
        let inline = request.contents[0].parts[0]
            .inline_data
            .as_ref()
            .expect("inline audio part");
        assert_eq!(inline.mime_type, "audio/mpeg");
        assert_eq!(inline.data, STANDARD.encode(b"abc"));
        assert!(request.system_instruction.is_some());
    }

    #[test]
    fn summary_request_embeds_transcript_in_prompt() {
        let request = GeminiService::summary_request("We decided to launch Friday.");
        let text = request.contents[0].parts[0].text.as_deref().unwrap();

        assert!(text.contains("We decided to launch Friday."));
        assert!(text.contains("key_decisions"));
        assert!(text.contains("meeting_metrics"));
    }

    #[test]
    fn extract_text_joins_candidate_parts() {
        let response = GenerateContentResponse {
            candidates: Some(vec![Candidate {
                content: Some(CandidateContent {
                    parts: Some(vec![
                        ResponsePart {
                            text: Some("Hello ".to_string()),
                        },
                        ResponsePart {
                            text: Some("world".to_string()),
                        },
                    ]),
                }),
            }]),
            error: None,
        };

        assert_eq!(
            GeminiService::extract_text(&response),
            Some("Hello world".to_string())
        );
    }

    #[test]
    fn extract_text_empty_response() {
        let response = GenerateContentResponse {
            candidates: None,
            error: None,
        };

        assert!(GeminiService::extract_text(&response).is_none());
    }
}
