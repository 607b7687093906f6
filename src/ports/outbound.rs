//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{Classification, CommentRecord, DomainError, VideoId};

/// Comment source. Returns one bounded page of top-level comments.
#[async_trait::async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch at most `limit` comments for `video_id`, in upstream order.
    ///
    /// Fails with `DomainError::CommentsDisabled` when the video has comments
    /// turned off, and `DomainError::SourceUnavailable` for anything else.
    /// An empty page is `Ok(vec![])`, not an error.
    async fn fetch_comments(
        &self,
        video_id: &VideoId,
        limit: u32,
    ) -> Result<Vec<CommentRecord>, DomainError>;
}

/// Sentiment classifier. One text in, one raw label + score out.
#[async_trait::async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify a single text. Errors are per-call (`DomainError::Classification`).
    async fn classify(&self, text: &str) -> Result<Classification, DomainError>;
}
