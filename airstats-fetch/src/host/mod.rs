//! Host APIs for airstats.
//!
//! This module provides abstractions for interacting with external systems:
//!
//! - [`http`] - HTTP client with tracing and domain allowlist
//! - [`secrets`] - Secrets store read access (AWS Secrets Manager)

pub mod http;
pub mod secrets;

// Re-export key types
pub use http::HttpClient;
pub use secrets::{AwsSecretsManager, SecretsApi};
