pub mod summary;

pub use summary::{ActionItem, MeetingMetrics, MeetingSummary, UploadResponse};
