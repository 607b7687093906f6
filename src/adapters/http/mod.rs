//! HTTP adapter. axum router over the AnalyzeUseCase inbound port.

pub mod error;
pub mod handlers;

use crate::ports::AnalyzeUseCase;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn AnalyzeUseCase>,
}

/// Build the application router.
///
/// CORS is fully open so a browser frontend on any origin can call the API.
pub fn router(analyzer: Arc<dyn AnalyzeUseCase>) -> Router {
    Router::new()
        .route("/", get(handlers::liveness))
        .route("/analyze", post(handlers::analyze))
        .with_state(AppState { analyzer })
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
}
