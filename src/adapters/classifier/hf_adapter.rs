//! Hugging Face Inference API adapter for sentiment classification.
//!
//! Sends one text per request to a hosted text-classification model and picks
//! the highest-scoring label.

use crate::domain::{Classification, DomainError};
use crate::ports::SentimentClassifier;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Hosted transformer classifier.
///
/// Works with any text-classification model on the Inference API (or a
/// self-hosted endpoint speaking the same protocol). The default model emits
/// `POSITIVE` / `NEGATIVE`.
pub struct HuggingFaceClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HuggingFaceClassifier {
    /// Create a new Hugging Face classifier.
    ///
    /// # Arguments
    /// * `api_url` - Models base URL (e.g., "https://api-inference.huggingface.co/models")
    /// * `model` - Model id (e.g., "distilbert-base-uncased-finetuned-sst-2-english")
    /// * `api_token` - Optional bearer token
    pub fn new(api_url: &str, model: &str, api_token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}/{}", api_url.trim_end_matches('/'), model),
            api_token,
        }
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Choose the top label from whichever response shape the API returned.
    fn top_label(response: InferenceResponse) -> Option<LabelScore> {
        let scores = match response {
            InferenceResponse::Nested(batches) => batches.into_iter().next()?,
            InferenceResponse::Flat(scores) => scores,
        };
        scores
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
    options: InferenceOptions,
}

#[derive(Serialize)]
struct InferenceParameters {
    /// Long comments are cut to the model's max sequence length instead of failing.
    truncation: bool,
}

#[derive(Serialize)]
struct InferenceOptions {
    wait_for_model: bool,
}

/// `[[{label, score}, ...]]` for a single input, or `[{label, score}, ...]` on some deployments.
#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[async_trait::async_trait]
impl SentimentClassifier for HuggingFaceClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, DomainError> {
        let request = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters { truncation: true },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };

        let mut builder = self.client.post(self.endpoint()).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::Classification(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "inference API returned error");
            return Err(DomainError::Classification(format!(
                "API error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            )));
        }

        let parsed: InferenceResponse = response.json().await.map_err(|e| {
            DomainError::Classification(format!("Failed to parse API response: {}", e))
        })?;

        let top = Self::top_label(parsed)
            .ok_or_else(|| DomainError::Classification("No labels returned".to_string()))?;

        debug!(label = %top.label, score = top.score, "classified text");

        Ok(Classification::new(top.label, top.score))
    }
}
