//! Application configuration. API credentials, upstream endpoints, limits.

use serde::Deserialize;
use std::str::FromStr;

/// Largest page the YouTube Data API returns for `commentThreads.list`.
/// The pipeline fetches a single page, so this is also the per-request comment cap.
pub const MAX_PAGE_SIZE: u32 = 100;

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_CLASSIFY_TIMEOUT_SECS: u64 = 10;
/// Cold hosted models can take well over a minute to load on the first call.
pub const DEFAULT_WARMUP_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_HF_API_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_HF_MODEL: &str = "distilbert-base-uncased-finetuned-sst-2-english";

/// Which sentiment classifier backs the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierKind {
    /// Hosted transformer model via the Hugging Face Inference API.
    HuggingFace,
    /// Offline word-list classifier.
    Lexicon,
}

impl FromStr for ClassifierKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "lexicon" => Ok(Self::Lexicon),
            other => Err(format!(
                "unknown classifier '{}' (expected 'huggingface' or 'lexicon')",
                other
            )),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Bind address. Read from SENTIMENT_HOST.
    #[serde(default)]
    pub host: Option<String>,

    /// Bind port. Read from SENTIMENT_PORT.
    #[serde(default)]
    pub port: Option<u16>,

    /// Comments fetched per request (one page, clamped to 1..=100). Read from SENTIMENT_MAX_COMMENTS.
    #[serde(default)]
    pub max_comments: Option<u32>,

    /// Per-call deadline for the comment fetch. Read from SENTIMENT_FETCH_TIMEOUT_SECS.
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,

    /// Per-comment deadline for classification. Read from SENTIMENT_CLASSIFY_TIMEOUT_SECS.
    #[serde(default)]
    pub classify_timeout_secs: Option<u64>,

    /// Deadline for the startup warm-up call. Read from SENTIMENT_WARMUP_TIMEOUT_SECS.
    #[serde(default)]
    pub warmup_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // YouTube Data API
    // ─────────────────────────────────────────────────────────────────────────
    /// API key. Read from YOUTUBE_API_KEY (required).
    #[serde(default)]
    pub youtube_api_key: Option<String>,

    /// API base URL. Read from SENTIMENT_YOUTUBE_API_URL.
    #[serde(default)]
    pub youtube_api_url: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Classifier
    // ─────────────────────────────────────────────────────────────────────────
    /// `huggingface` (default) or `lexicon`. Read from SENTIMENT_CLASSIFIER.
    #[serde(default)]
    pub classifier: Option<String>,

    /// Inference API base URL. Read from SENTIMENT_HF_API_URL.
    #[serde(default)]
    pub hf_api_url: Option<String>,

    /// Model id. Read from SENTIMENT_HF_MODEL.
    #[serde(default)]
    pub hf_model: Option<String>,

    /// Optional bearer token. Read from HF_API_TOKEN.
    #[serde(default)]
    pub hf_api_token: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("SENTIMENT"));
        if let Ok(path) = std::env::var("SENTIMENT_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Credentials keep their conventional un-prefixed names so an existing .env works as-is.
        if let Ok(key) = std::env::var("YOUTUBE_API_KEY") {
            cfg.youtube_api_key = Some(key);
        }
        if let Ok(token) = std::env::var("HF_API_TOKEN") {
            cfg.hf_api_token = Some(token);
        }
        Ok(cfg)
    }

    /// Returns the YouTube API key if present and non-empty.
    pub fn youtube_api_key(&self) -> Option<String> {
        non_empty(&self.youtube_api_key)
    }

    /// Returns the YouTube API base URL. Defaults to the public v3 endpoint.
    pub fn youtube_api_url_or_default(&self) -> String {
        non_empty(&self.youtube_api_url).unwrap_or_else(|| DEFAULT_YOUTUBE_API_URL.to_string())
    }

    /// Returns `host:port`. Defaults to 0.0.0.0:8000.
    pub fn bind_addr(&self) -> String {
        let host = non_empty(&self.host).unwrap_or_else(|| "0.0.0.0".to_string());
        format!("{}:{}", host, self.port.unwrap_or(8000))
    }

    /// Returns the page cap, clamped to what one API page can hold.
    pub fn max_comments_or_default(&self) -> u32 {
        self.max_comments
            .unwrap_or(MAX_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn fetch_timeout_secs_or_default(&self) -> u64 {
        self.fetch_timeout_secs
            .unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
            .max(1)
    }

    pub fn classify_timeout_secs_or_default(&self) -> u64 {
        self.classify_timeout_secs
            .unwrap_or(DEFAULT_CLASSIFY_TIMEOUT_SECS)
            .max(1)
    }

    /// Never shorter than the per-comment deadline.
    pub fn warmup_timeout_secs_or_default(&self) -> u64 {
        self.warmup_timeout_secs
            .unwrap_or(DEFAULT_WARMUP_TIMEOUT_SECS)
            .max(self.classify_timeout_secs_or_default())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Classifier Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the configured classifier kind. Defaults to Hugging Face.
    pub fn classifier_kind(&self) -> Result<ClassifierKind, config::ConfigError> {
        match non_empty(&self.classifier) {
            None => Ok(ClassifierKind::HuggingFace),
            Some(s) => s.parse().map_err(config::ConfigError::Message),
        }
    }

    pub fn hf_api_url_or_default(&self) -> String {
        non_empty(&self.hf_api_url).unwrap_or_else(|| DEFAULT_HF_API_URL.to_string())
    }

    pub fn hf_model_or_default(&self) -> String {
        non_empty(&self.hf_model).unwrap_or_else(|| DEFAULT_HF_MODEL.to_string())
    }

    pub fn hf_api_token(&self) -> Option<String> {
        non_empty(&self.hf_api_token)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
