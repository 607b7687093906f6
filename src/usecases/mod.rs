//! Application use cases. Orchestrate domain logic via ports.

pub mod sentiment_service;

pub use sentiment_service::{ClassifierState, PipelineSettings, SentimentService};
