//! End-to-end runs against a mock SORACOM API with in-memory secrets and sinks.

use std::sync::{Arc, Mutex};

use airstats_cli::{Orchestrator, OrchestratorError};
use airstats_core::{MetricRecord, StatName, StatsSink};
use airstats_fetch::{CredentialLoader, FetchError, HttpClient, SecretsApi, SecretsError};
use airstats_sink::{MetricDatum, MetricsBackend, MetricsSink, SinkError};
use airstats_soracom::{Endpoints, SoracomError};
use async_trait::async_trait;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = r#"{"operatorId":"op1","authKeyId":"k","authKey":"s","coverageType":""}"#;
const GLOBAL_SECRET: &str = r#"{"operatorId":"op1","authKeyId":"k","authKey":"s","coverageType":"g"}"#;

// ============================================================================
// Fakes
// ============================================================================

struct StaticSecrets(Result<String, String>);

#[async_trait]
impl SecretsApi for StaticSecrets {
    async fn get_secret_string(&self, secret_id: &str) -> Result<String, SecretsError> {
        assert_eq!(secret_id, "SoracomStatsMonitor-Credential");
        self.0.clone().map_err(SecretsError::NotFound)
    }
}

#[derive(Default)]
struct CapturingSink {
    batches: Mutex<Vec<Vec<MetricRecord>>>,
}

impl CapturingSink {
    fn batches(&self) -> Vec<Vec<MetricRecord>> {
        self.batches.lock().unwrap().clone()
    }
}

impl StatsSink for CapturingSink {
    type Error = SinkError;

    async fn save_stats(&self, records: &[MetricRecord]) -> Result<(), SinkError> {
        self.batches.lock().unwrap().push(records.to_vec());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingBackend {
    calls: Mutex<Vec<(String, Vec<MetricDatum>)>>,
}

#[async_trait]
impl MetricsBackend for RecordingBackend {
    async fn put_metric_data(&self, namespace: &str, data: Vec<MetricDatum>) -> Result<(), SinkError> {
        self.calls.lock().unwrap().push((namespace.to_string(), data));
        Ok(())
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn orchestrator<K>(secret: Result<&str, &str>, endpoints: Endpoints, sink: K) -> Orchestrator<K>
where
    K: StatsSink,
    OrchestratorError: From<K::Error>,
{
    let secrets = StaticSecrets(secret.map(str::to_string).map_err(str::to_string));
    Orchestrator::new(
        CredentialLoader::new(Arc::new(secrets)),
        HttpClient::new().unwrap(),
        endpoints,
        sink,
    )
}

async fn mount_auth(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"apiKey": "A", "token": "T"})))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_operator_stats(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/stats/air/operators/op1"))
        .and(query_param("period", "day"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"unixtime": 1000, "uploadByteSizeTotal": 5, "downloadByteSizeTotal": 7}
        ])))
        .mount(server)
        .await;
}

async fn mount_groups(server: &MockServer, groups: &[&str]) {
    let body: Vec<_> = groups.iter().map(|id| json!({"groupId": id})).collect();
    Mock::given(method("GET"))
        .and(path("/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_single_entry_no_groups_publishes_two_records() {
    let server = MockServer::start().await;
    mount_auth(&server, 1).await;
    mount_operator_stats(&server).await;
    mount_groups(&server, &[]).await;

    let orch = orchestrator(
        Ok(SECRET),
        Endpoints::new(server.uri(), server.uri()),
        CapturingSink::default(),
    );

    let count = orch.run("SoracomStatsMonitor-Credential").await.unwrap();
    assert_eq!(count, 2);

    let batches = orch.sink().batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(
        batches[0],
        vec![
            MetricRecord::new("op1", 1000, StatName::UploadByteSizeTotal, 5),
            MetricRecord::new("op1", 1000, StatName::DownloadByteSizeTotal, 7),
        ]
    );
}

#[tokio::test]
async fn test_group_records_follow_operator_records() {
    let server = MockServer::start().await;
    mount_auth(&server, 1).await;
    mount_operator_stats(&server).await;
    mount_groups(&server, &["grp1"]).await;

    Mock::given(method("GET"))
        .and(path("/stats/air/groups/grp1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"unixtime": 2000, "uploadByteSizeTotal": 11, "downloadByteSizeTotal": 13}
        ])))
        .mount(&server)
        .await;

    let orch = orchestrator(
        Ok(SECRET),
        Endpoints::new(server.uri(), server.uri()),
        CapturingSink::default(),
    );

    assert_eq!(orch.run("SoracomStatsMonitor-Credential").await.unwrap(), 4);

    let batch = &orch.sink().batches()[0];
    assert_eq!(batch[0].dimension_key, "op1");
    assert_eq!(batch[1].dimension_key, "op1");
    assert_eq!(batch[2], MetricRecord::new("op1-grp1", 2000, StatName::UploadByteSizeTotal, 11));
    assert_eq!(batch[3], MetricRecord::new("op1-grp1", 2000, StatName::DownloadByteSizeTotal, 13));
}

#[tokio::test]
async fn test_global_coverage_uses_global_host() {
    let default_host = MockServer::start().await;
    let global_host = MockServer::start().await;

    mount_auth(&global_host, 1).await;
    mount_operator_stats(&global_host).await;
    mount_groups(&global_host, &[]).await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&default_host)
        .await;

    let orch = orchestrator(
        Ok(GLOBAL_SECRET),
        Endpoints::new(default_host.uri(), global_host.uri()),
        CapturingSink::default(),
    );

    orch.run("SoracomStatsMonitor-Credential").await.unwrap();

    let batch = &orch.sink().batches()[0];
    assert_eq!(batch[0].dimension_key, "op1-g");
}

#[tokio::test]
async fn test_each_run_authenticates_again() {
    let server = MockServer::start().await;
    mount_auth(&server, 2).await;
    mount_operator_stats(&server).await;
    mount_groups(&server, &[]).await;

    let orch = orchestrator(
        Ok(SECRET),
        Endpoints::new(server.uri(), server.uri()),
        CapturingSink::default(),
    );

    orch.run("SoracomStatsMonitor-Credential").await.unwrap();
    orch.run("SoracomStatsMonitor-Credential").await.unwrap();

    assert_eq!(orch.sink().batches().len(), 2);
}

#[tokio::test]
async fn test_writes_one_cloudwatch_batch() {
    let server = MockServer::start().await;
    mount_auth(&server, 1).await;
    mount_operator_stats(&server).await;
    mount_groups(&server, &[]).await;

    let backend = Arc::new(RecordingBackend::default());
    let orch = orchestrator(
        Ok(SECRET),
        Endpoints::new(server.uri(), server.uri()),
        MetricsSink::new(backend.clone()),
    );

    orch.run("SoracomStatsMonitor-Credential").await.unwrap();

    let calls = backend.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);

    let (namespace, data) = &calls[0];
    assert_eq!(namespace, "SORACOM/AIR");
    assert_eq!(data.len(), 2);
    assert_eq!(data[0].metric_name, "uploadByteSizeTotal");
    assert_eq!(data[0].dimensions[0].name, "stats");
    assert_eq!(data[0].dimensions[0].value, "op1");
    assert_eq!(data[0].timestamp.timestamp(), 1000);
    assert_eq!(data[0].unit, "Bytes");
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_missing_secret_aborts_before_any_request() {
    let server = MockServer::start().await;
    mount_auth(&server, 0).await;

    let orch = orchestrator(
        Err("SoracomStatsMonitor-Credential"),
        Endpoints::new(server.uri(), server.uri()),
        CapturingSink::default(),
    );

    let err = orch.run("SoracomStatsMonitor-Credential").await.unwrap_err();
    assert!(matches!(
        err,
        OrchestratorError::Credentials(FetchError::SecretRetrieval(SecretsError::NotFound(_)))
    ));
    assert!(orch.sink().batches().is_empty());
}

#[tokio::test]
async fn test_malformed_secret_is_format_error() {
    let server = MockServer::start().await;
    mount_auth(&server, 0).await;

    let orch = orchestrator(
        Ok(r#"{"operatorId":"op1"}"#),
        Endpoints::new(server.uri(), server.uri()),
        CapturingSink::default(),
    );

    let err = orch.run("SoracomStatsMonitor-Credential").await.unwrap_err();
    assert!(matches!(err, OrchestratorError::Credentials(FetchError::SecretFormat(_))));
}

#[tokio::test]
async fn test_rejected_auth_publishes_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let orch = orchestrator(
        Ok(SECRET),
        Endpoints::new(server.uri(), server.uri()),
        CapturingSink::default(),
    );

    let err = orch.run("SoracomStatsMonitor-Credential").await.unwrap_err();
    assert!(matches!(err, OrchestratorError::Usage(SoracomError::Authentication(_))));
    assert!(orch.sink().batches().is_empty());
}

#[tokio::test]
async fn test_failing_group_publishes_nothing() {
    let server = MockServer::start().await;
    mount_auth(&server, 1).await;
    mount_operator_stats(&server).await;
    mount_groups(&server, &["grp1"]).await;

    Mock::given(method("GET"))
        .and(path("/stats/air/groups/grp1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let orch = orchestrator(
        Ok(SECRET),
        Endpoints::new(server.uri(), server.uri()),
        CapturingSink::default(),
    );

    let err = orch.run("SoracomStatsMonitor-Credential").await.unwrap_err();
    assert!(matches!(
        err,
        OrchestratorError::Usage(SoracomError::ApiRequest { status: 500, .. })
    ));
    assert!(orch.sink().batches().is_empty());
}
