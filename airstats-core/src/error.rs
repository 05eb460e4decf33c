//! Core error types for airstats.

use thiserror::Error;

/// Core error type for airstats operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field is missing or empty.
    #[error("Missing field: {0}")]
    MissingField(&'static str),
}
