//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// No video identifier could be found in the submitted URL.
    #[error("Invalid or unsupported video URL")]
    InvalidUrl,

    /// Upstream reports comments are turned off for the video.
    #[error("Comments are disabled for this video")]
    CommentsDisabled,

    /// Comment fetch failed: transport, quota, bad key, timeout or unreadable body.
    #[error("Comment source error: {0}")]
    SourceUnavailable(String),

    /// The classifier failed to initialise at startup.
    #[error("Sentiment classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    /// Per-comment classification failure. Recovered inside the pipeline.
    #[error("Classification failed: {0}")]
    Classification(String),
}
