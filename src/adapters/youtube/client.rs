//! Implements CommentSource over the YouTube Data API v3.
//!
//! One `commentThreads.list` request per call; no pagination.

use crate::adapters::youtube::mapper::{self, CommentThreadList};
use crate::domain::{CommentRecord, DomainError, VideoId};
use crate::ports::CommentSource;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

/// Max characters of an upstream error body kept in error messages.
const ERROR_BODY_CHARS: usize = 200;

/// YouTube comment source.
pub struct YouTubeCommentSource {
    client: Client,
    api_url: String,
    api_key: String,
}

impl YouTubeCommentSource {
    /// Create a new YouTube comment source.
    ///
    /// # Arguments
    /// * `api_url` - API base (e.g. "https://www.googleapis.com/youtube/v3")
    /// * `api_key` - Data API key
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/commentThreads", self.api_url)
    }
}

#[async_trait]
impl CommentSource for YouTubeCommentSource {
    async fn fetch_comments(
        &self,
        video_id: &VideoId,
        limit: u32,
    ) -> Result<Vec<CommentRecord>, DomainError> {
        let max_results = limit.to_string();
        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("part", "snippet"),
                ("videoId", video_id.as_str()),
                ("maxResults", max_results.as_str()),
                ("textFormat", "plainText"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                // Request URLs carry the API key.
                let e = e.without_url();
                error!(video_id = %video_id, error = %e, "comment request failed");
                DomainError::SourceUnavailable(format!("HTTP request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            error!(video_id = %video_id, status = %status, body = %text, "YouTube API returned error");
            if mapper::is_comments_disabled(&text) {
                return Err(DomainError::CommentsDisabled);
            }
            return Err(DomainError::SourceUnavailable(format!(
                "API error {}: {}",
                status,
                text.chars().take(ERROR_BODY_CHARS).collect::<String>()
            )));
        }

        let list: CommentThreadList = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!(video_id = %video_id, error = %e, "failed to parse YouTube response");
            DomainError::SourceUnavailable(format!("Failed to parse API response: {}", e))
        })?;

        let records = mapper::threads_to_records(list);
        debug!(video_id = %video_id, count = records.len(), "received comment threads");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::extract_video_id;
    use httpmock::prelude::*;

    fn video() -> VideoId {
        extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_single_page() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/commentThreads")
                    .query_param("part", "snippet")
                    .query_param("videoId", "dQw4w9WgXcQ")
                    .query_param("maxResults", "100")
                    .query_param("textFormat", "plainText")
                    .query_param("key", "test-key");
                then.status(200).json_body(serde_json::json!({
                    "items": [
                        {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "Great video"}}}},
                        {"snippet": {"topLevelComment": {"snippet": {"textDisplay": "   "}}}}
                    ],
                    "nextPageToken": "ignored"
                }));
            })
            .await;

        let source = YouTubeCommentSource::new(server.base_url(), "test-key".into());
        let records = source.fetch_comments(&video(), 100).await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(
            records,
            vec![CommentRecord::new("Great video"), CommentRecord::new("   ")]
        );
    }

    #[tokio::test]
    async fn test_comments_disabled_maps_to_domain_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/commentThreads");
                then.status(403).json_body(serde_json::json!({
                    "error": {
                        "code": 403,
                        "message": "The video identified by the videoId parameter has disabled comments.",
                        "errors": [{"reason": "commentsDisabled"}]
                    }
                }));
            })
            .await;

        let source = YouTubeCommentSource::new(server.base_url(), "k".into());
        let err = source.fetch_comments(&video(), 100).await.unwrap_err();
        assert!(matches!(err, DomainError::CommentsDisabled));
    }

    #[tokio::test]
    async fn test_other_errors_are_source_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/commentThreads");
                then.status(403).json_body(serde_json::json!({
                    "error": {"code": 403, "errors": [{"reason": "quotaExceeded"}]}
                }));
            })
            .await;

        let source = YouTubeCommentSource::new(server.base_url(), "k".into());
        let err = source.fetch_comments(&video(), 100).await.unwrap_err();
        assert!(matches!(err, DomainError::SourceUnavailable(msg) if msg.contains("403")));
    }

    #[tokio::test]
    async fn test_invalid_json_is_source_unavailable() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/commentThreads");
                then.status(200).body("not json");
            })
            .await;

        let source = YouTubeCommentSource::new(server.base_url(), "k".into());
        let err = source.fetch_comments(&video(), 100).await.unwrap_err();
        assert!(matches!(err, DomainError::SourceUnavailable(_)));
    }
}
