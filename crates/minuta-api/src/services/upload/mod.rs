//! Audio upload pipeline: multipart extraction, policy validation, and
//! transient staging with guaranteed release.

mod service;
mod staging;
mod types;

pub use service::AudioUploadService;
pub use staging::StagedAudio;
pub use types::ValidatedAudio;
