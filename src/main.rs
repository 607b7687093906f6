//! Wiring & DI. Entry point: load config, bootstrap adapters, inject into the service, serve HTTP.
//! No business logic here; the pipeline lives in SentimentService.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use yt_sentiment::adapters::classifier::{HuggingFaceClassifier, LexiconClassifier};
use yt_sentiment::adapters::http;
use yt_sentiment::adapters::youtube::YouTubeCommentSource;
use yt_sentiment::ports::{AnalyzeUseCase, CommentSource};
use yt_sentiment::shared::config::{AppConfig, ClassifierKind};
use yt_sentiment::usecases::{ClassifierState, PipelineSettings, SentimentService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;
    let Some(api_key) = cfg.youtube_api_key() else {
        anyhow::bail!("YouTube API key is missing. Set YOUTUBE_API_KEY (env or .env).");
    };

    // --- Comment source ---
    let comments: Arc<dyn CommentSource> = Arc::new(YouTubeCommentSource::new(
        cfg.youtube_api_url_or_default(),
        api_key,
    ));

    let settings = PipelineSettings {
        max_comments: cfg.max_comments_or_default(),
        fetch_timeout: Duration::from_secs(cfg.fetch_timeout_secs_or_default()),
        classify_timeout: Duration::from_secs(cfg.classify_timeout_secs_or_default()),
    };
    info!(
        max_comments = settings.max_comments,
        "comment cap: {} per request (single page, no pagination)", settings.max_comments
    );

    // --- Classifier: probed once; failure leaves the server up but answering 503 ---
    let classifier = match cfg
        .classifier_kind()
        .map_err(|e| anyhow::anyhow!("config: {}", e))?
    {
        ClassifierKind::HuggingFace => {
            let model = cfg.hf_model_or_default();
            info!(
                model = %model,
                url = %cfg.hf_api_url_or_default(),
                "loading sentiment model, this may take a moment"
            );
            let adapter = HuggingFaceClassifier::new(
                &cfg.hf_api_url_or_default(),
                &model,
                cfg.hf_api_token(),
            );
            let warmup = Duration::from_secs(cfg.warmup_timeout_secs_or_default());
            ClassifierState::probe(Arc::new(adapter), warmup).await
        }
        ClassifierKind::Lexicon => {
            info!("using offline lexicon sentiment classifier");
            ClassifierState::Ready(Arc::new(LexiconClassifier::new()))
        }
    };
    if !classifier.is_ready() {
        warn!("sentiment classifier unavailable; /analyze will answer 503");
    }

    // --- Service + HTTP ---
    let service: Arc<dyn AnalyzeUseCase> =
        Arc::new(SentimentService::new(comments, classifier, settings));
    let app = http::router(service);

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("bind {}: {}", addr, e))?;
    info!(addr = %addr, "sentiment API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        warn!("failed to install Ctrl+C handler; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
