//! Infrastructure adapters. Implement outbound ports, drive inbound ones.
//!
//! YouTube, sentiment classifiers, HTTP. Map errors to DomainError.

pub mod classifier;
pub mod http;
pub mod youtube;
