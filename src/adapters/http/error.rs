//! Map domain errors to HTTP responses.
//!
//! Bodies carry a fixed `detail` message; upstream error text never reaches the caller.

use crate::domain::DomainError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    detail: &'static str,
}

impl ApiError {
    pub fn status_and_detail(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            DomainError::InvalidUrl => (StatusCode::BAD_REQUEST, "Invalid or unsupported YouTube URL."),
            DomainError::CommentsDisabled => {
                (StatusCode::FORBIDDEN, "Comments are disabled for this video.")
            }
            DomainError::SourceUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch comments. Check the video URL and your API key.",
            ),
            DomainError::ClassifierUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Sentiment model is not available.")
            }
            DomainError::Classification(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal server error occurred.",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        (status, Json(ErrorBody { detail })).into_response()
    }
}
