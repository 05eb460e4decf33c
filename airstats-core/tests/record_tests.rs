//! Integration tests for core record types.

use airstats_core::{Credential, MetricRecord, StatName};

#[test]
fn test_record_serializes_camel_case() {
    let record = MetricRecord::new("op1-g", 1000, StatName::UploadByteSizeTotal, 5);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["dimensionKey"], "op1-g");
    assert_eq!(json["timestampSecs"], 1000);
    assert_eq!(json["metricName"], "uploadByteSizeTotal");
    assert_eq!(json["value"], 5);
}

#[test]
fn test_credential_keys_for_operator_and_group() {
    let credential = Credential::new("op1", "k", "s").with_coverage_type("g");

    let operator = credential.dimension_key(None).unwrap();
    let group = credential.dimension_key(Some("grp1")).unwrap();

    assert_eq!(operator, "op1-g");
    assert_eq!(group, "op1-g-grp1");
    assert!(!group.starts_with('-') && !group.ends_with('-'));
}
