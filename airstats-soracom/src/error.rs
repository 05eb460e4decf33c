//! SORACOM-specific errors.

use airstats_core::CoreError;
use airstats_fetch::HttpError;
use thiserror::Error;

/// SORACOM-specific errors.
#[derive(Debug, Error)]
pub enum SoracomError {
    /// `/auth` returned a non-success status or an unusable body.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// A data endpoint returned a non-success status.
    #[error("API request to {endpoint} failed with HTTP {status}: {body}")]
    ApiRequest {
        /// Endpoint path that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// Transport-level failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] HttpError),

    /// The response body could not be parsed.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Core error while building records.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl From<reqwest::Error> for SoracomError {
    fn from(err: reqwest::Error) -> Self {
        SoracomError::Http(HttpError::Request(err))
    }
}

impl SoracomError {
    /// Returns the HTTP status for API request failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            SoracomError::ApiRequest { status, .. } => Some(*status),
            _ => None,
        }
    }
}
