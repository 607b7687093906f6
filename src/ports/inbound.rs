//! Inbound port. The HTTP adapter calls into the application.

use crate::domain::{AggregationReport, DomainError};

/// Input port: analyze the comments of the video behind a URL.
#[async_trait::async_trait]
pub trait AnalyzeUseCase: Send + Sync {
    /// Parse `url`, fetch its comments and tally their sentiment.
    ///
    /// Errors are terminal request-level conditions; per-comment failures are
    /// reported inside the returned report instead.
    async fn analyze(&self, url: &str) -> Result<AggregationReport, DomainError>;
}
