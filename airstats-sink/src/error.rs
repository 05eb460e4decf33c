//! Sink error types.

use thiserror::Error;

/// Errors that can occur while publishing metrics.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The metrics backend rejected or failed the write.
    #[error("Metric write failed: {0}")]
    MetricWrite(String),

    /// A datum could not be converted into the backend's shape.
    #[error("Invalid metric datum: {0}")]
    InvalidDatum(String),
}
