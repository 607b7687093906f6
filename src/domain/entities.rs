//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/YouTube types here — these are mapped from adapters.

use serde::Serialize;
use std::fmt;

/// Number of characters in a YouTube video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// An 11-character video identifier drawn from `[A-Za-z0-9_-]`.
///
/// Only produced by [`crate::domain::video_url::extract_video_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Take the leading identifier from `candidate` if its first 11 characters are all valid.
    pub(crate) fn from_prefix(candidate: &str) -> Option<Self> {
        let token = candidate.get(..VIDEO_ID_LEN)?;
        token
            .bytes()
            .all(is_id_byte)
            .then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_id_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// One top-level comment as retrieved from the comment source.
///
/// `text` is `None` when the upstream record had no usable text field
/// (missing, null, or not a string).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentRecord {
    pub text: Option<String>,
}

impl CommentRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// A record whose text could not be read.
    pub fn malformed() -> Self {
        Self { text: None }
    }

    /// The raw text, if it is present and not blank.
    pub fn classifiable_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Normalized sentiment outcome for one comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
    /// Anything else the classifier said (neutral, unknown labels, ...).
    Other,
}

impl SentimentLabel {
    /// Map a raw classifier label onto the three domain labels.
    ///
    /// Matching is ASCII case-insensitive after trimming.
    pub fn normalize(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("positive") {
            Self::Positive
        } else if raw.eq_ignore_ascii_case("negative") {
            Self::Negative
        } else {
            Self::Other
        }
    }
}

/// Raw classifier output for one text.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub score: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    pub fn sentiment(&self) -> SentimentLabel {
        SentimentLabel::normalize(&self.label)
    }
}

/// Positive/negative counters returned to the caller.
///
/// Serializes as `{"positive": n, "negative": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentTally {
    pub positive: u64,
    pub negative: u64,
}

impl SentimentTally {
    /// Count one label. `Other` leaves both counters unchanged.
    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Other => {}
        }
    }

    /// Comments that reached a counter.
    pub fn total(&self) -> u64 {
        self.positive + self.negative
    }
}
