//! Trait definitions for airstats.
//!
//! The pipeline has two seams: something that produces [`MetricRecord`]s and
//! something that publishes them. The orchestrator only talks to these traits.

use crate::models::MetricRecord;

/// Trait for sources that collect normalized usage records.
///
/// Implementors are responsible for:
/// - Authenticating with the upstream API
/// - Computing the lookback window
/// - Normalizing every response into [`MetricRecord`]s
pub trait UsageSource: Send + Sync {
    /// Error returned when collection fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Collects all records for the current lookback window.
    ///
    /// Any failure aborts the whole collection; no partial set is returned.
    fn fetch_stats(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<MetricRecord>, Self::Error>> + Send;
}

/// Trait for sinks that publish a batch of records.
pub trait StatsSink: Send + Sync {
    /// Error returned when publishing fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Publishes the whole batch.
    fn save_stats(
        &self,
        records: &[MetricRecord],
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;
}
