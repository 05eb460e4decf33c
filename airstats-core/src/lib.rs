// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # airstats Core
//!
//! Core types, models, and traits shared by all airstats crates.
//!
//! This crate provides the foundational abstractions of the stats pipeline:
//!
//! - Domain models (normalized metric records, SORACOM credentials)
//! - Error types
//! - Trait definitions for the usage source and the stats sink
//!
//! ## Key Types
//!
//! ### Records
//! - [`MetricRecord`] - A single normalized usage observation
//! - [`StatName`] - The enumerated metric names
//! - [`dimension_key`] - Builds the composite dimension tag
//!
//! ### Credentials
//! - [`Credential`] - Long-lived auth key plus the short-lived token pair
//! - [`ApiToken`] - The API key/token pair returned by `/auth`

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Credentials
    ApiToken,
    Credential,
    GLOBAL_COVERAGE,
    // Records
    KEY_SEPARATOR,
    MetricRecord,
    StatName,
    dimension_key,
};

// Re-export traits
pub use traits::{StatsSink, UsageSource};
