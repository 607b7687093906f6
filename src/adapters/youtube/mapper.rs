//! Map YouTube Data API payloads to domain entities.
//!
//! Extracts CommentRecord from `commentThreads.list` responses and classifies
//! API error bodies.

use crate::domain::CommentRecord;
use serde::Deserialize;

/// Error reason the API reports when a video has comments turned off.
pub const COMMENTS_DISABLED_REASON: &str = "commentsDisabled";

/// `commentThreads.list` response. Only the fields we read.
#[derive(Debug, Deserialize)]
pub struct CommentThreadList {
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
pub struct CommentThread {
    #[serde(default)]
    pub snippet: Option<ThreadSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct ThreadSnippet {
    #[serde(rename = "topLevelComment", default)]
    pub top_level_comment: Option<Comment>,
}

#[derive(Debug, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
pub struct CommentSnippet {
    /// Kept as a raw value: anything but a JSON string becomes a malformed record.
    #[serde(rename = "textDisplay", default)]
    pub text_display: Option<serde_json::Value>,
}

/// Error envelope: `{"error": {"code": 403, "message": "...", "errors": [{"reason": "..."}]}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: Option<String>,
}

/// Map every thread to one record, preserving API order.
pub fn threads_to_records(list: CommentThreadList) -> Vec<CommentRecord> {
    list.items.into_iter().map(thread_to_record).collect()
}

fn thread_to_record(thread: CommentThread) -> CommentRecord {
    let text = thread
        .snippet
        .and_then(|s| s.top_level_comment)
        .and_then(|c| c.snippet)
        .and_then(|s| s.text_display);
    match text {
        Some(serde_json::Value::String(text)) => CommentRecord::new(text),
        _ => CommentRecord::malformed(),
    }
}

/// True when an error body says comments are disabled.
///
/// Checks the structured `errors[].reason` first and falls back to a substring
/// match for bodies that are not the usual envelope.
pub fn is_comments_disabled(body: &str) -> bool {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope
            .error
            .errors
            .iter()
            .any(|e| e.reason.as_deref() == Some(COMMENTS_DISABLED_REASON)),
        Err(_) => body.contains(COMMENTS_DISABLED_REASON),
    }
}
