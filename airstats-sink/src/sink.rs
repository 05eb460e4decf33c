//! Publishing records as metrics.

use std::sync::Arc;

use airstats_core::{MetricRecord, StatsSink};
use chrono::DateTime;
use tracing::{info, instrument};

use crate::backend::{Dimension, MetricDatum, MetricsBackend, UNIT_BYTES};
use crate::error::SinkError;

/// Namespace all SORACOM Air metrics are written under.
pub const NAMESPACE: &str = "SORACOM/AIR";

/// Name of the single dimension carrying the record's dimension key.
pub const DIMENSION_NAME: &str = "stats";

/// Publishes records to a metrics backend in one batched write.
///
/// No chunking is applied: the whole collection goes out in a single
/// `put_metric_data` call, even if the backend caps batch sizes.
///
/// An empty collection is still sent. CloudWatch rejects `PutMetricData`
/// without data points, so a day with no usage surfaces as
/// `SinkError::MetricWrite`.
#[derive(Clone)]
pub struct MetricsSink {
    backend: Arc<dyn MetricsBackend>,
    namespace: String,
}

impl MetricsSink {
    /// Creates a sink writing under [`NAMESPACE`].
    pub fn new(backend: Arc<dyn MetricsBackend>) -> Self {
        Self {
            backend,
            namespace: NAMESPACE.to_string(),
        }
    }

    /// Maps one record to the backend's datum shape.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::InvalidDatum` if the timestamp is out of range.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_datum(record: &MetricRecord) -> Result<MetricDatum, SinkError> {
        let timestamp = DateTime::from_timestamp(record.timestamp_secs, 0).ok_or_else(|| {
            SinkError::InvalidDatum(format!("timestamp out of range: {}", record.timestamp_secs))
        })?;

        Ok(MetricDatum {
            metric_name: record.metric_name.as_str().to_string(),
            dimensions: vec![Dimension {
                name: DIMENSION_NAME.to_string(),
                value: record.dimension_key.clone(),
            }],
            timestamp,
            value: record.value as f64,
            unit: UNIT_BYTES,
        })
    }

    /// Writes every record in a single backend call.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::MetricWrite` if the backend call fails.
    #[instrument(skip(self, records), fields(records = records.len()))]
    pub async fn save_stats(&self, records: &[MetricRecord]) -> Result<(), SinkError> {
        let data = records
            .iter()
            .map(Self::to_datum)
            .collect::<Result<Vec<_>, _>>()?;

        self.backend.put_metric_data(&self.namespace, data).await?;

        info!(namespace = %self.namespace, "Saved stats");
        Ok(())
    }
}

impl StatsSink for MetricsSink {
    type Error = SinkError;

    async fn save_stats(&self, records: &[MetricRecord]) -> Result<(), SinkError> {
        MetricsSink::save_stats(self, records).await
    }
}

impl std::fmt::Debug for MetricsSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsSink")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
