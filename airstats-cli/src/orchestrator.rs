//! One collection run: load credential, collect stats, publish them.

use std::sync::Arc;

use airstats_core::{StatsSink, UsageSource};
use airstats_fetch::{AwsSecretsManager, CredentialLoader, FetchError, HttpClient, HttpError};
use airstats_sink::SinkError;
use airstats_soracom::{Endpoints, SoracomError, UsageApiClient};
use thiserror::Error;
use tracing::{info, instrument};

use crate::output::OutputError;

// ============================================================================
// Errors
// ============================================================================

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// The credential could not be loaded.
    #[error("Failed to load credential: {0}")]
    Credentials(#[from] FetchError),

    /// Collecting stats from the API failed.
    #[error("Failed to collect stats: {0}")]
    Usage(#[from] SoracomError),

    /// Publishing the batch failed.
    #[error("Failed to publish stats: {0}")]
    Sink(#[from] SinkError),

    /// Printing the batch failed.
    #[error("Failed to print stats: {0}")]
    Output(#[from] OutputError),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] HttpError),
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Runs the fetch and publish pipeline for one invocation.
///
/// Every run loads the credential fresh and builds a new API client, so a
/// token is never reused across runs.
pub struct Orchestrator<K> {
    loader: CredentialLoader,
    http: HttpClient,
    endpoints: Endpoints,
    sink: K,
}

impl<K> Orchestrator<K>
where
    K: StatsSink,
    OrchestratorError: From<K::Error>,
{
    /// Creates an orchestrator from its parts.
    pub fn new(loader: CredentialLoader, http: HttpClient, endpoints: Endpoints, sink: K) -> Self {
        Self {
            loader,
            http,
            endpoints,
            sink,
        }
    }

    /// Wires the production stack: Secrets Manager, the SORACOM hosts behind
    /// the domain allowlist, and the given sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn for_aws(config: &aws_config::SdkConfig, sink: K) -> Result<Self, OrchestratorError> {
        let loader = CredentialLoader::new(Arc::new(AwsSecretsManager::new(config)));
        let http = HttpClient::with_allowed_domains(Endpoints::allowed_domains())?;
        Ok(Self::new(loader, http, Endpoints::default(), sink))
    }

    /// The sink records are published to.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Loads the credential under `secret_id`, collects stats, and publishes them.
    ///
    /// Returns the number of records published.
    ///
    /// # Errors
    ///
    /// Returns the first failure; nothing is published if collection fails.
    #[instrument(skip(self))]
    pub async fn run(&self, secret_id: &str) -> Result<usize, OrchestratorError> {
        let credential = self.loader.load(secret_id).await?;
        let client = UsageApiClient::with_endpoints(self.http.clone(), &self.endpoints, credential);
        publish::<UsageApiClient, K>(&client, &self.sink).await
    }
}

impl<K> std::fmt::Debug for Orchestrator<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

/// Collects every record from `source` and hands the batch to `sink`.
///
/// # Errors
///
/// Returns the source's error without touching the sink, or the sink's error.
pub async fn publish<U, K>(source: &U, sink: &K) -> Result<usize, OrchestratorError>
where
    U: UsageSource,
    K: StatsSink,
    OrchestratorError: From<U::Error> + From<K::Error>,
{
    let records = source.fetch_stats().await?;
    let count = records.len();

    sink.save_stats(&records).await?;

    info!(records = count, "Published stats");
    Ok(count)
}

// ============================================================================
// Tests
// ============================================================================
