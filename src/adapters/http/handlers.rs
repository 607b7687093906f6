//! JSON handlers for the public HTTP surface.

use super::error::ApiError;
use super::AppState;
use crate::domain::SentimentTally;
use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

pub const LIVENESS_MESSAGE: &str = "Sentiment Analyzer API is running.";

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    status: &'static str,
}

/// `GET /`
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: LIVENESS_MESSAGE,
    })
}

/// `POST /analyze`
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<SentimentTally>, ApiError> {
    let report = state.analyzer.analyze(&request.url).await?;
    info!(
        video_id = %report.video_id,
        fetched = report.fetched,
        skipped = report.skipped.len(),
        "analyze request served"
    );
    Ok(Json(report.tally))
}
