//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod aggregation;
pub mod entities;
pub mod errors;
pub mod video_url;

pub use aggregation::{fold_outcomes, AggregationReport, ItemOutcome, SkipReason, SkippedComment};
pub use entities::{
    Classification, CommentRecord, SentimentLabel, SentimentTally, VideoId, VIDEO_ID_LEN,
};
pub use errors::DomainError;
pub use video_url::extract_video_id;
