use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use yt_sentiment::adapters::classifier::LexiconClassifier;
use yt_sentiment::adapters::http::router;
use yt_sentiment::domain::{CommentRecord, DomainError, VideoId};
use yt_sentiment::ports::CommentSource;
use yt_sentiment::usecases::{ClassifierState, PipelineSettings, SentimentService};

enum Upstream {
    Comments(Vec<&'static str>),
    Disabled,
    Broken,
}

struct FakeYouTube(Upstream);

#[async_trait::async_trait]
impl CommentSource for FakeYouTube {
    async fn fetch_comments(
        &self,
        _video_id: &VideoId,
        _limit: u32,
    ) -> Result<Vec<CommentRecord>, DomainError> {
        match &self.0 {
            Upstream::Comments(texts) => Ok(texts.iter().map(|t| CommentRecord::new(*t)).collect()),
            Upstream::Disabled => Err(DomainError::CommentsDisabled),
            Upstream::Broken => Err(DomainError::SourceUnavailable(
                "API error 500: key=SECRET".into(),
            )),
        }
    }
}

fn app(upstream: Upstream, classifier: ClassifierState) -> axum::Router {
    let service = SentimentService::new(
        Arc::new(FakeYouTube(upstream)),
        classifier,
        PipelineSettings {
            max_comments: 100,
            fetch_timeout: Duration::from_secs(1),
            classify_timeout: Duration::from_secs(1),
        },
    );
    router(Arc::new(service))
}

fn lexicon() -> ClassifierState {
    ClassifierState::Ready(Arc::new(LexiconClassifier::new()))
}

fn analyze_request(url: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::json!({ "url": url }).to_string()))
        .unwrap()
}

async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_liveness() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send(app(Upstream::Comments(vec![]), lexicon()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({"status": "Sentiment Analyzer API is running."})
    );
}

#[tokio::test]
async fn test_analyze_success_shape() {
    let upstream = Upstream::Comments(vec!["I love this!", "I hate this.", "   ", "first"]);
    let (status, body) = send(
        app(upstream, lexicon()),
        analyze_request("https://youtu.be/dQw4w9WgXcQ"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"positive": 1, "negative": 1}));
}

#[tokio::test]
async fn test_analyze_no_comments_is_ok() {
    let (status, body) = send(
        app(Upstream::Comments(vec![]), lexicon()),
        analyze_request("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"positive": 0, "negative": 0}));
}

#[tokio::test]
async fn test_invalid_url_is_400() {
    let (status, body) = send(
        app(Upstream::Comments(vec![]), lexicon()),
        analyze_request("https://vimeo.com/123"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Invalid or unsupported YouTube URL.");
}

#[tokio::test]
async fn test_comments_disabled_is_403() {
    let (status, body) = send(
        app(Upstream::Disabled, lexicon()),
        analyze_request("https://youtu.be/dQw4w9WgXcQ"),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Comments are disabled for this video.");
}

#[tokio::test]
async fn test_upstream_failure_is_500_without_leaking() {
    let (status, body) = send(
        app(Upstream::Broken, lexicon()),
        analyze_request("https://youtu.be/dQw4w9WgXcQ"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.to_string().contains("SECRET"));
}

#[tokio::test]
async fn test_unavailable_classifier_is_503() {
    let (status, body) = send(
        app(
            Upstream::Comments(vec!["good"]),
            ClassifierState::Unavailable("warm-up failed".into()),
        ),
        analyze_request("not even a url"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], "Sentiment model is not available.");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/analyze")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app(Upstream::Comments(vec![]), lexicon())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
