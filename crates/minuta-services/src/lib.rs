//! Minuta Services Layer
//!
//! This crate hosts the upstream provider clients: the speech-to-text and
//! summarization calls consumed over the network. Keep provider plumbing
//! here; keep thin HTTP handling in minuta-api.

pub mod providers;

pub use providers::gemini::GeminiService;
pub use providers::{Summarizer, Transcriber};
