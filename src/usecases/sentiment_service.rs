//! Sentiment service. Orchestrates the comment-sentiment aggregation pipeline.
//!
//! Parse URL -> fetch one page of comments -> classify each sequentially -> fold.
//! Terminal errors short-circuit; per-comment failures become skip entries.

use crate::domain::{
    extract_video_id, fold_outcomes, AggregationReport, CommentRecord, DomainError, ItemOutcome,
    VideoId,
};
use crate::ports::{AnalyzeUseCase, CommentSource, SentimentClassifier};
use crate::shared::config::{DEFAULT_CLASSIFY_TIMEOUT_SECS, DEFAULT_FETCH_TIMEOUT_SECS, MAX_PAGE_SIZE};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// Text used to check the classifier answers at startup.
const WARMUP_TEXT: &str = "This is a warm-up sentence.";

/// Max characters of a comment echoed into diagnostics logs.
const LOG_EXCERPT_CHARS: usize = 80;

/// Classifier availability, decided once at startup.
#[derive(Clone)]
pub enum ClassifierState {
    Ready(Arc<dyn SentimentClassifier>),
    /// Initialisation failed; every request is refused with the stored reason.
    Unavailable(String),
}

impl ClassifierState {
    /// Probe `classifier` with a warm-up call. A failure or timeout marks it unavailable.
    pub async fn probe(classifier: Arc<dyn SentimentClassifier>, timeout: Duration) -> Self {
        match tokio::time::timeout(timeout, classifier.classify(WARMUP_TEXT)).await {
            Ok(Ok(c)) => {
                info!(label = %c.label, score = c.score, "sentiment classifier ready");
                Self::Ready(classifier)
            }
            Ok(Err(e)) => {
                error!(error = %e, "failed to initialise sentiment classifier");
                Self::Unavailable(e.to_string())
            }
            Err(_) => {
                error!(?timeout, "sentiment classifier warm-up timed out");
                Self::Unavailable(format!("warm-up timed out after {:?}", timeout))
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    fn ready(&self) -> Result<&Arc<dyn SentimentClassifier>, DomainError> {
        match self {
            Self::Ready(c) => Ok(c),
            Self::Unavailable(reason) => Err(DomainError::ClassifierUnavailable(reason.clone())),
        }
    }
}

/// Pipeline limits.
#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    /// Single-page cap passed to the comment source. No further pages are fetched.
    pub max_comments: u32,
    pub fetch_timeout: Duration,
    pub classify_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_comments: MAX_PAGE_SIZE,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            classify_timeout: Duration::from_secs(DEFAULT_CLASSIFY_TIMEOUT_SECS),
        }
    }
}

/// Service for comment-sentiment aggregation.
pub struct SentimentService {
    comments: Arc<dyn CommentSource>,
    classifier: ClassifierState,
    settings: PipelineSettings,
}

impl SentimentService {
    /// Create a new sentiment service.
    ///
    /// # Arguments
    /// * `comments` - Comment source implementation (YouTube, in-memory, etc.)
    /// * `classifier` - Classifier state decided at startup
    /// * `settings` - Page cap and per-call timeouts
    pub fn new(
        comments: Arc<dyn CommentSource>,
        classifier: ClassifierState,
        settings: PipelineSettings,
    ) -> Self {
        Self {
            comments,
            classifier,
            settings,
        }
    }

    /// Run the pipeline for one URL.
    ///
    /// Returns a report even when every comment fails classification (zero tally).
    pub async fn aggregate(&self, url: &str) -> Result<AggregationReport, DomainError> {
        let classifier = self.classifier.ready()?;

        let video_id = extract_video_id(url).ok_or(DomainError::InvalidUrl)?;
        let comments = self.fetch(&video_id).await?;
        info!(video_id = %video_id, comments = comments.len(), "fetched comments");

        let mut outcomes = Vec::with_capacity(comments.len());
        for (index, record) in comments.iter().enumerate() {
            outcomes.push(self.classify_one(classifier.as_ref(), index, record).await);
        }

        let (tally, skipped) = fold_outcomes(outcomes);
        let report = AggregationReport {
            video_id,
            fetched: comments.len(),
            tally,
            skipped,
        };

        info!(
            video_id = %report.video_id,
            positive = report.tally.positive,
            negative = report.tally.negative,
            counted = report.tally.total(),
            skipped = report.skipped.len(),
            failures = report.failures(),
            "aggregation complete"
        );

        Ok(report)
    }

    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<CommentRecord>, DomainError> {
        let call = self
            .comments
            .fetch_comments(video_id, self.settings.max_comments);
        match tokio::time::timeout(self.settings.fetch_timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                error!(video_id = %video_id, timeout = ?self.settings.fetch_timeout, "comment fetch timed out");
                Err(DomainError::SourceUnavailable(format!(
                    "fetch timed out after {:?}",
                    self.settings.fetch_timeout
                )))
            }
        }
    }

    async fn classify_one(
        &self,
        classifier: &dyn SentimentClassifier,
        index: usize,
        record: &CommentRecord,
    ) -> ItemOutcome {
        let Some(text) = record.classifiable_text() else {
            return ItemOutcome::Blank;
        };

        let result =
            match tokio::time::timeout(self.settings.classify_timeout, classifier.classify(text))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(DomainError::Classification(format!(
                    "timed out after {:?}",
                    self.settings.classify_timeout
                ))),
            };

        match result {
            Ok(classification) => ItemOutcome::Classified(classification),
            Err(e) => {
                warn!(
                    index,
                    comment = %excerpt(text),
                    error = %e,
                    "could not analyze comment, skipping"
                );
                ItemOutcome::Failed(e.to_string())
            }
        }
    }
}

#[async_trait::async_trait]
impl AnalyzeUseCase for SentimentService {
    async fn analyze(&self, url: &str) -> Result<AggregationReport, DomainError> {
        self.aggregate(url).await
    }
}

fn excerpt(text: &str) -> String {
    let mut out: String = text.chars().take(LOG_EXCERPT_CHARS).collect();
    if text.chars().nth(LOG_EXCERPT_CHARS).is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Classification;

    struct FixedClassifier(Result<&'static str, &'static str>);

    #[async_trait::async_trait]
    impl SentimentClassifier for FixedClassifier {
        async fn classify(&self, _text: &str) -> Result<Classification, DomainError> {
            self.0
                .map(|label| Classification::new(label, 0.99))
                .map_err(|e| DomainError::Classification(e.to_string()))
        }
    }

    struct StalledClassifier;

    #[async_trait::async_trait]
    impl SentimentClassifier for StalledClassifier {
        async fn classify(&self, _text: &str) -> Result<Classification, DomainError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_probe_ready() {
        let state =
            ClassifierState::probe(Arc::new(FixedClassifier(Ok("POSITIVE"))), Duration::from_secs(1))
                .await;
        assert!(state.is_ready());
    }

    #[tokio::test]
    async fn test_probe_failure_is_unavailable() {
        let state =
            ClassifierState::probe(Arc::new(FixedClassifier(Err("no model"))), Duration::from_secs(1))
                .await;
        assert!(!state.is_ready());
        assert!(matches!(
            state.ready(),
            Err(DomainError::ClassifierUnavailable(reason)) if reason.contains("no model")
        ));
    }

    struct SlowClassifier(Duration);

    #[async_trait::async_trait]
    impl SentimentClassifier for SlowClassifier {
        async fn classify(&self, _text: &str) -> Result<Classification, DomainError> {
            tokio::time::sleep(self.0).await;
            Ok(Classification::new("POSITIVE", 0.9))
        }
    }

    #[tokio::test]
    async fn test_probe_waits_for_slow_model_load() {
        // Slower than a per-comment deadline would allow, inside the warm-up one.
        let slow = Arc::new(SlowClassifier(Duration::from_millis(100)));
        let state = ClassifierState::probe(slow, Duration::from_secs(2)).await;
        assert!(state.is_ready());
    }

    #[tokio::test]
    async fn test_probe_timeout_is_unavailable() {
        let state =
            ClassifierState::probe(Arc::new(StalledClassifier), Duration::from_millis(50)).await;
        assert!(!state.is_ready());
    }

    #[test]
    fn test_excerpt_truncates() {
        assert_eq!(excerpt("short"), "short");
        let long = "x".repeat(200);
        let e = excerpt(&long);
        assert_eq!(e.chars().count(), LOG_EXCERPT_CHARS + 1);
        assert!(e.ends_with('…'));
    }
}
