//! Upstream provider traits
//!
//! The two external collaborators are modeled as separate traits so either
//! side can be swapped or mocked independently of the other.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

pub mod gemini;

/// Speech-to-text provider: audio bytes + MIME type in, transcript text out
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Bytes, mime_type: &str) -> Result<String>;
}

/// Summarization provider: transcript in, raw structured-output text out.
///
/// The returned text is whatever the model produced; shaping it into the
/// stable contract is the normalizer's job, not the provider's.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript: &str) -> Result<String>;
}
