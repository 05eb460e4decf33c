//! JSON output formatting.

use airstats_core::MetricRecord;
use airstats_sink::NAMESPACE;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::OutputError;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a whole batch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOutput {
    pub namespace: &'static str,
    pub count: usize,
    pub records: Vec<RecordOutput>,
}

/// A single metric data point.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOutput {
    pub dimension_key: String,
    pub metric_name: &'static str,
    pub unixtime: i64,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_datetime_opt")]
    pub timestamp: Option<DateTime<Utc>>,
    pub value: u64,
}

impl From<&MetricRecord> for RecordOutput {
    fn from(record: &MetricRecord) -> Self {
        Self {
            dimension_key: record.dimension_key.clone(),
            metric_name: record.metric_name.as_str(),
            unixtime: record.timestamp_secs,
            timestamp: record.timestamp(),
            value: record.value,
        }
    }
}

// ============================================================================
// Serialization helpers
// ============================================================================

#[allow(clippy::ref_option)]
fn serialize_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&dt.to_rfc3339()),
        None => s.serialize_none(),
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String, OutputError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a batch of records.
    pub fn format_records(&self, records: &[MetricRecord]) -> Result<String, OutputError> {
        let output = BatchOutput {
            namespace: NAMESPACE,
            count: records.len(),
            records: records.iter().map(RecordOutput::from).collect(),
        };
        self.format(&output)
    }
}

// ============================================================================
// Tests
// ============================================================================
