//! Normalized usage records.
//!
//! Every daily usage entry returned by the SORACOM stats API becomes two
//! [`MetricRecord`]s, one per [`StatName`], tagged with a dimension key that
//! identifies the operator, the coverage type, and (for group stats) the group.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Separator placed between dimension key components.
pub const KEY_SEPARATOR: &str = "-";

// ============================================================================
// Stat Name
// ============================================================================

/// Metric names emitted for each daily usage entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatName {
    /// Total bytes uploaded by devices.
    UploadByteSizeTotal,
    /// Total bytes downloaded by devices.
    DownloadByteSizeTotal,
}

impl StatName {
    /// All stat names, in emission order.
    pub const ALL: [StatName; 2] = [StatName::UploadByteSizeTotal, StatName::DownloadByteSizeTotal];

    /// Returns the wire name, which is also the CloudWatch metric name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UploadByteSizeTotal => "uploadByteSizeTotal",
            Self::DownloadByteSizeTotal => "downloadByteSizeTotal",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Dimension Key
// ============================================================================

/// Builds the composite dimension key for a record.
///
/// Non-empty components among operator id, coverage type, and group id are
/// joined with [`KEY_SEPARATOR`]. Absent or empty components are skipped, so
/// the key never starts or ends with a separator.
///
/// # Errors
///
/// Returns `CoreError::MissingField` if `operator_id` is empty, since every
/// key must identify its operator.
pub fn dimension_key(
    operator_id: &str,
    coverage_type: Option<&str>,
    group_id: Option<&str>,
) -> Result<String, CoreError> {
    if operator_id.is_empty() {
        return Err(CoreError::MissingField("operatorId"));
    }

    let key = [Some(operator_id), coverage_type, group_id]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR);

    Ok(key)
}

// ============================================================================
// Metric Record
// ============================================================================

/// A single normalized usage observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    /// Composite tag, see [`dimension_key`].
    pub dimension_key: String,
    /// Unix epoch seconds as returned by the API (day granularity).
    pub timestamp_secs: i64,
    /// Which counter this record carries.
    pub metric_name: StatName,
    /// Byte count.
    pub value: u64,
}

impl MetricRecord {
    /// Creates a new record.
    pub fn new(
        dimension_key: impl Into<String>,
        timestamp_secs: i64,
        metric_name: StatName,
        value: u64,
    ) -> Self {
        Self {
            dimension_key: dimension_key.into(),
            timestamp_secs,
            metric_name,
            value,
        }
    }

    /// Returns the record timestamp as a UTC date-time.
    ///
    /// `None` if the timestamp is outside chrono's representable range.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp_secs, 0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_key_with_coverage() {
        assert_eq!(dimension_key("op1", Some("g"), None).unwrap(), "op1-g");
    }

    #[test]
    fn test_group_key_with_coverage() {
        assert_eq!(
            dimension_key("op1", Some("g"), Some("grp1")).unwrap(),
            "op1-g-grp1"
        );
    }

    #[test]
    fn test_empty_components_are_skipped() {
        assert_eq!(dimension_key("op1", Some(""), None).unwrap(), "op1");
        assert_eq!(dimension_key("op1", None, None).unwrap(), "op1");
        assert_eq!(dimension_key("op1", None, Some("grp1")).unwrap(), "op1-grp1");
        assert_eq!(dimension_key("op1", Some(""), Some("")).unwrap(), "op1");
    }

    #[test]
    fn test_empty_operator_rejected() {
        let err = dimension_key("", Some("g"), Some("grp1")).unwrap_err();
        assert!(matches!(err, CoreError::MissingField("operatorId")));
    }

    #[test]
    fn test_stat_name_wire_names() {
        assert_eq!(StatName::UploadByteSizeTotal.to_string(), "uploadByteSizeTotal");
        assert_eq!(
            serde_json::to_string(&StatName::DownloadByteSizeTotal).unwrap(),
            r#""downloadByteSizeTotal""#
        );
    }

    #[test]
    fn test_record_timestamp() {
        let record = MetricRecord::new("op1", 86_400, StatName::UploadByteSizeTotal, 5);
        let ts = record.timestamp().unwrap();
        assert_eq!(ts.to_rfc3339(), "1970-01-02T00:00:00+00:00");
    }
}
