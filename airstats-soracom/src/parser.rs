//! SORACOM response parsing.
//!
//! Operator and group stats share the same response shape: an array of daily
//! entries. Each entry becomes two records, upload then download.

use airstats_core::{MetricRecord, StatName};
use serde::Deserialize;
use tracing::warn;

use crate::error::SoracomError;

// ============================================================================
// Response Types
// ============================================================================

/// One daily Air usage entry from `/stats/air/...`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirStatsEntry {
    /// Start of the day, Unix epoch seconds.
    pub unixtime: i64,

    /// Bytes uploaded during the day. Required: an entry without it is an
    /// invalid response rather than a zero data point.
    pub upload_byte_size_total: u64,

    /// Bytes downloaded during the day. Required, like the upload total.
    pub download_byte_size_total: u64,
}

impl AirStatsEntry {
    /// Value for the given stat.
    pub fn value(&self, stat: StatName) -> u64 {
        match stat {
            StatName::UploadByteSizeTotal => self.upload_byte_size_total,
            StatName::DownloadByteSizeTotal => self.download_byte_size_total,
        }
    }

    /// Emits one record per [`StatName`], sharing timestamp and key.
    pub fn to_records(&self, dimension_key: &str) -> impl Iterator<Item = MetricRecord> + '_ {
        let key = dimension_key.to_string();
        StatName::ALL
            .into_iter()
            .map(move |stat| MetricRecord::new(key.clone(), self.unixtime, stat, self.value(stat)))
    }
}

/// Group entry from `/groups`. Only the id is used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    /// Group id.
    pub group_id: String,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a stats response body into entries.
///
/// # Errors
///
/// Returns `SoracomError::InvalidResponse` if the body is not an array of
/// stats entries.
pub fn parse_stats(body: &str) -> Result<Vec<AirStatsEntry>, SoracomError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse stats response");
        SoracomError::InvalidResponse(format!("JSON error: {e}"))
    })
}

/// Parses a `/groups` response body into group ids, in listing order.
///
/// # Errors
///
/// Returns `SoracomError::InvalidResponse` if the body is not an array of
/// groups.
pub fn parse_group_ids(body: &str) -> Result<Vec<String>, SoracomError> {
    let groups: Vec<GroupSummary> = serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "Failed to parse groups response");
        SoracomError::InvalidResponse(format!("JSON error: {e}"))
    })?;

    Ok(groups.into_iter().map(|g| g.group_id).collect())
}

/// Converts stats entries into records for one dimension key.
pub fn records_from_entries(entries: &[AirStatsEntry], dimension_key: &str) -> Vec<MetricRecord> {
    entries
        .iter()
        .flat_map(|entry| entry.to_records(dimension_key))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_entry_yields_upload_and_download() {
        let entries = parse_stats(
            r#"[
                {"unixtime": 1000, "uploadByteSizeTotal": 5, "downloadByteSizeTotal": 7},
                {"unixtime": 87400, "uploadByteSizeTotal": 1, "downloadByteSizeTotal": 2}
            ]"#,
        )
        .unwrap();

        let records = records_from_entries(&entries, "op1-g");
        assert_eq!(records.len(), 4);

        assert_eq!(
            records[0],
            MetricRecord::new("op1-g", 1000, StatName::UploadByteSizeTotal, 5)
        );
        assert_eq!(
            records[1],
            MetricRecord::new("op1-g", 1000, StatName::DownloadByteSizeTotal, 7)
        );
        assert_eq!(records[2].timestamp_secs, 87400);
        assert_eq!(records[3].value, 2);
    }

    #[test]
    fn test_stats_with_extra_fields() {
        // The real API also returns per-speed-class breakdowns.
        let entries = parse_stats(
            r#"[{
                "unixtime": 1000,
                "uploadByteSizeTotal": 5,
                "downloadByteSizeTotal": 7,
                "uploadPacketSizeTotal": 3,
                "dataTrafficStatsMap": {"s1.standard": {"uploadByteSizeTotal": 5}}
            }]"#,
        )
        .unwrap();

        assert_eq!(entries[0].download_byte_size_total, 7);
    }

    #[test]
    fn test_missing_byte_count_is_invalid_response() {
        assert!(matches!(
            parse_stats(r#"[{"unixtime": 1000, "uploadByteSizeTotal": 5}]"#),
            Err(SoracomError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_stats(r#"[{"unixtime": 1000, "downloadByteSizeTotal": 7}]"#),
            Err(SoracomError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_empty_stats_yield_no_records() {
        let entries = parse_stats("[]").unwrap();
        assert!(records_from_entries(&entries, "op1").is_empty());
    }

    #[test]
    fn test_invalid_stats_body() {
        assert!(matches!(
            parse_stats(r#"{"message": "oops"}"#),
            Err(SoracomError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_group_ids_in_listing_order() {
        let ids = parse_group_ids(
            r#"[
                {"groupId": "grp-b", "tags": {"name": "B"}},
                {"groupId": "grp-a", "operatorId": "op1"}
            ]"#,
        )
        .unwrap();

        assert_eq!(ids, vec!["grp-b".to_string(), "grp-a".to_string()]);
    }
}
