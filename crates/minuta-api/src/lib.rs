//! Minuta API Library
//!
//! This crate provides the HTTP handlers, upload pipeline, and application
//! setup for the meeting summarizer service.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::ErrorResponse;
pub use state::AppState;
