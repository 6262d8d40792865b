//! Minuta Core Library
//!
//! This crate provides the domain models, error types, configuration,
//! upload validation, and summary normalization shared across the Minuta
//! components.

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod validation;

// Re-export commonly used types
pub use config::{BaseConfig, Config, SummarizerConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use normalize::{normalize_summary, word_count};
pub use validation::{
    mime_type_for_extension, sanitize_filename, UploadValidator, ValidationError,
};
