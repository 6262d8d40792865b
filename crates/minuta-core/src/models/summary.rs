use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Single follow-up item extracted from the meeting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ActionItem {
    pub task: String,
    pub owner: String,
    pub deadline: String,
    pub priority: String,
}

/// Aggregate counts and topics for the meeting.
///
/// `total_decisions` and `total_action_items` are always recomputed from the
/// sibling lists rather than trusted from the upstream payload, so the counts
/// stay consistent with what the client renders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MeetingMetrics {
    pub total_decisions: usize,
    pub total_action_items: usize,
    pub key_topics: Vec<String>,
}

/// The stable summary contract returned to the client.
///
/// Every field is always present with a type-correct value even when the
/// upstream model omitted or malformed it; see [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MeetingSummary {
    pub summary: String,
    pub key_decisions: Vec<String>,
    pub action_items: Vec<ActionItem>,
    pub next_steps: Vec<String>,
    pub meeting_metrics: MeetingMetrics,
}

impl MeetingSummary {
    /// Minimal well-formed summary carrying unstructured provider output verbatim
    pub fn fallback(raw_text: impl Into<String>) -> Self {
        MeetingSummary {
            summary: raw_text.into(),
            ..Default::default()
        }
    }

    /// Recompute the metric counts from the lists they describe
    pub fn recompute_metrics(&mut self) {
        self.meeting_metrics.total_decisions = self.key_decisions.len();
        self.meeting_metrics.total_action_items = self.action_items.len();
    }
}

/// Successful upload response body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub transcript: String,
    pub word_count: usize,
    pub summary: MeetingSummary,
    pub filename: String,
    pub processed_at: DateTime<Utc>,
}

impl UploadResponse {
    pub fn new(
        transcript: String,
        word_count: usize,
        summary: MeetingSummary,
        filename: String,
    ) -> Self {
        UploadResponse {
            success: true,
            transcript,
            word_count,
            summary,
            filename,
            processed_at: Utc::now(),
        }
    }
}
