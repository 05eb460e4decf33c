//! Fetch error types.

use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for credential loading.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The secrets store call failed or returned nothing usable.
    #[error("Secret retrieval failed: {0}")]
    SecretRetrieval(#[from] SecretsError),

    /// The secret payload could not be parsed into a credential.
    #[error("Secret format invalid: {0}")]
    SecretFormat(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::SecretFormat(err.to_string())
    }
}

impl From<airstats_core::CoreError> for FetchError {
    fn from(err: airstats_core::CoreError) -> Self {
        FetchError::SecretFormat(err.to_string())
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

// ============================================================================
// Secrets Error
// ============================================================================

/// Error type for secrets store operations.
#[derive(Debug, Error)]
pub enum SecretsError {
    /// Secret not found.
    #[error("Secret not found: {0}")]
    NotFound(String),

    /// The secret exists but has no string payload.
    #[error("Secret {0} has no string value")]
    EmptyPayload(String),

    /// The secrets service rejected or failed the call.
    #[error("Secrets service error: {0}")]
    Service(String),
}
