//! Metrics backend write contract.
//!
//! The sink talks to the backend through [`MetricsBackend`], one batched
//! "put metric data" call per run. [`MetricDatum`] mirrors the CloudWatch
//! datum shape so the mapping can be checked without an AWS client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SinkError;

/// CloudWatch unit label for byte counts.
pub const UNIT_BYTES: &str = "Bytes";

// ============================================================================
// Datum
// ============================================================================

/// A metric dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Dimension value.
    pub value: String,
}

/// One data point in the backend's native shape.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDatum {
    /// Metric name.
    pub metric_name: String,
    /// Dimensions attached to the data point.
    pub dimensions: Vec<Dimension>,
    /// Observation time.
    pub timestamp: DateTime<Utc>,
    /// Observed value.
    pub value: f64,
    /// Unit label.
    pub unit: &'static str,
}

// ============================================================================
// Backend Trait
// ============================================================================

/// Write access to a metrics backend.
#[async_trait]
pub trait MetricsBackend: Send + Sync {
    /// Writes all data points in a single request.
    ///
    /// # Arguments
    /// * `namespace` - Metric namespace
    /// * `data` - Every data point of the batch
    async fn put_metric_data(&self, namespace: &str, data: Vec<MetricDatum>) -> Result<(), SinkError>;
}
