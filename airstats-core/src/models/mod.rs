//! Domain models for airstats.
//!
//! ## Submodules
//!
//! - [`record`] - Normalized usage records (MetricRecord, StatName)
//! - [`credential`] - SORACOM credentials (Credential, ApiToken)

mod credential;
mod record;

// Re-export everything at the models level
pub use credential::{ApiToken, Credential, GLOBAL_COVERAGE};
pub use record::{KEY_SEPARATOR, MetricRecord, StatName, dimension_key};
