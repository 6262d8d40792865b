//! Result normalization
//!
//! Takes the raw text a summarization model returned and shapes it into a
//! [`MeetingSummary`] that always satisfies the output contract: every field
//! present and type-correct, counts recomputed from the lists, and a
//! plain-text fallback when the payload is not structured data at all. The
//! caller never sees a parse error.

use serde_json::Value;

use crate::models::{ActionItem, MeetingSummary};

/// Normalize a raw summarization payload into the stable contract.
///
/// Models habitually wrap JSON in Markdown code fences; those are stripped
/// before parsing. If the remainder is not a JSON object, the whole raw text
/// becomes `summary` verbatim and every collection stays empty.
pub fn normalize_summary(raw: &str) -> MeetingSummary {
    let stripped = strip_code_fences(raw);

    let mut summary = match serde_json::from_str::<Value>(stripped) {
        Ok(Value::Object(map)) => from_object(map),
        Ok(_) | Err(_) => MeetingSummary::fallback(raw),
    };

    summary.recompute_metrics();
    summary
}

/// Count non-empty whitespace-separated tokens in the transcript.
///
/// Computed server-side; the count claimed by the model is never trusted.
pub fn word_count(transcript: &str) -> usize {
    transcript.split_whitespace().count()
}

/// Strip a surrounding Markdown code fence (```json ... ``` or ``` ... ```)
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json", "JSON", ...) up to the first newline.
    let body = match rest.split_once('\n') {
        Some((_info, body)) => body,
        None => rest,
    };

    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Field-by-field defaulting from a parsed JSON object
fn from_object(map: serde_json::Map<String, Value>) -> MeetingSummary {
    let mut summary = MeetingSummary {
        summary: string_field(map.get("summary")),
        key_decisions: string_list(map.get("key_decisions")),
        action_items: action_items(map.get("action_items")),
        next_steps: string_list(map.get("next_steps")),
        ..Default::default()
    };

    if let Some(Value::Object(metrics)) = map.get("meeting_metrics") {
        summary.meeting_metrics.key_topics = string_list(metrics.get("key_topics"));
    }

    summary
}

fn string_field(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn action_items(value: Option<&Value>) -> Vec<ActionItem> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let map = item.as_object()?;
            Some(ActionItem {
                task: string_field(map.get("task")),
                owner: string_field(map.get("owner")),
                deadline: string_field(map.get("deadline")),
                priority: string_field(map.get("priority")),
            })
        })
        .collect()
}
