//! Classifier adapters. Implement SentimentClassifier.
//!
//! Hosted transformer model via Hugging Face, or an offline lexicon.

pub mod hf_adapter;
pub mod lexicon_adapter;

pub use hf_adapter::HuggingFaceClassifier;
pub use lexicon_adapter::LexiconClassifier;
