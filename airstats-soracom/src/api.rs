//! SORACOM Air usage API client.
//!
//! Every request goes through [`AuthSession::authorized_headers`] first, so
//! the first call of a session authenticates and later calls reuse the token.

use airstats_core::{Credential, MetricRecord, UsageSource};
use airstats_fetch::{HttpClient, ResponseExt};
use chrono::Utc;
use futures::stream::{FuturesUnordered, TryStreamExt};
use tracing::{debug, info, instrument, warn};

use crate::auth::AuthSession;
use crate::endpoint::{Endpoints, GROUP_STATS_ENDPOINT, GROUPS_ENDPOINT, OPERATOR_STATS_ENDPOINT};
use crate::error::SoracomError;
use crate::parser::{parse_group_ids, parse_stats, records_from_entries};

// ============================================================================
// Window
// ============================================================================

/// Width of the lookback window: two days.
pub const LOOKBACK_SECS: i64 = 2 * 24 * 60 * 60;

/// Aggregation period requested from the stats endpoints.
const PERIOD: &str = "day";

/// Time range for a stats request, Unix epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsWindow {
    /// Start of the window.
    pub from: i64,
    /// End of the window.
    pub to: i64,
}

impl StatsWindow {
    /// The lookback window ending at `now`.
    pub fn ending_at(now: i64) -> Self {
        Self {
            from: now - LOOKBACK_SECS,
            to: now,
        }
    }

    /// The lookback window ending at the current wall-clock time.
    pub fn current() -> Self {
        Self::ending_at(Utc::now().timestamp())
    }

    fn query(&self) -> [(&'static str, String); 3] {
        [
            ("from", self.from.to_string()),
            ("to", self.to.to_string()),
            ("period", PERIOD.to_string()),
        ]
    }
}

// ============================================================================
// API Client
// ============================================================================

/// SORACOM Air usage client.
#[derive(Debug)]
pub struct UsageApiClient {
    http: HttpClient,
    auth: AuthSession,
}

impl UsageApiClient {
    /// Creates a client for the production SORACOM hosts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credential: Credential) -> Result<Self, SoracomError> {
        let http = HttpClient::with_allowed_domains(Endpoints::allowed_domains())?;
        Ok(Self::with_endpoints(http, &Endpoints::default(), credential))
    }

    /// Creates a client with explicit HTTP client and base URLs.
    pub fn with_endpoints(http: HttpClient, endpoints: &Endpoints, credential: Credential) -> Self {
        let auth = AuthSession::new(http.clone(), endpoints, credential);
        Self { http, auth }
    }

    /// The session used to sign requests.
    pub fn auth(&self) -> &AuthSession {
        &self.auth
    }

    /// Authenticated GET returning the raw body.
    async fn get_body(&self, path: &str, query: &[(&str, String)]) -> Result<String, SoracomError> {
        let headers = self.auth.authorized_headers().await?;
        let url = format!("{}{}", self.auth.base_url(), path);

        let response = self.http.get_with_headers(&url, query, headers).await?;
        let status = response.status();

        if !status.is_success() {
            if response.is_rate_limited() {
                warn!(retry_after = ?response.retry_after_secs(), "Rate limited by SORACOM API");
            }
            let body = response.text().await.unwrap_or_default();
            return Err(SoracomError::ApiRequest {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }

    /// Fetches account-level daily stats for `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns `SoracomError::ApiRequest` on a non-success status.
    #[instrument(skip(self), fields(operator_id = %self.auth.credential().operator_id))]
    pub async fn get_operator_stats(&self, from: i64, to: i64) -> Result<Vec<MetricRecord>, SoracomError> {
        debug!("Fetching operator stats");

        let credential = self.auth.credential();
        let path = format!("{OPERATOR_STATS_ENDPOINT}/{}", credential.operator_id);
        let body = self.get_body(&path, &StatsWindow { from, to }.query()).await?;

        let entries = parse_stats(&body)?;
        let records = records_from_entries(&entries, &credential.dimension_key(None)?);

        debug!(entries = entries.len(), records = records.len(), "Fetched operator stats");
        Ok(records)
    }

    /// Lists every group id under the account, in listing order.
    ///
    /// # Errors
    ///
    /// Returns `SoracomError::ApiRequest` on a non-success status.
    #[instrument(skip(self))]
    pub async fn list_groups(&self) -> Result<Vec<String>, SoracomError> {
        debug!("Listing groups");

        let body = self.get_body(GROUPS_ENDPOINT, &[]).await?;
        let group_ids = parse_group_ids(&body)?;

        debug!(groups = group_ids.len(), "Listed groups");
        Ok(group_ids)
    }

    /// Fetches daily stats for one group.
    ///
    /// # Errors
    ///
    /// Returns `SoracomError::ApiRequest` on a non-success status.
    #[instrument(skip(self))]
    pub async fn get_group_stats(
        &self,
        group_id: &str,
        from: i64,
        to: i64,
    ) -> Result<Vec<MetricRecord>, SoracomError> {
        let path = format!("{GROUP_STATS_ENDPOINT}/{group_id}");
        let body = self.get_body(&path, &StatsWindow { from, to }.query()).await?;

        let entries = parse_stats(&body)?;
        let key = self.auth.credential().dimension_key(Some(group_id))?;
        let records = records_from_entries(&entries, &key);

        debug!(records = records.len(), "Fetched group stats");
        Ok(records)
    }

    /// Fetches stats for every group concurrently.
    ///
    /// Records are concatenated in completion order. The first failing group
    /// aborts the whole call and the remaining requests are dropped.
    ///
    /// # Errors
    ///
    /// Returns the first error from listing or from any group fetch.
    #[instrument(skip(self))]
    pub async fn get_all_group_stats(&self, from: i64, to: i64) -> Result<Vec<MetricRecord>, SoracomError> {
        let group_ids = self.list_groups().await?;

        let mut pending = FuturesUnordered::new();
        for group_id in &group_ids {
            pending.push(self.get_group_stats(group_id, from, to));
        }

        let mut records = Vec::new();
        while let Some(group_records) = pending.try_next().await? {
            records.extend(group_records);
        }

        debug!(groups = group_ids.len(), records = records.len(), "Fetched all group stats");
        Ok(records)
    }

    /// Collects operator and group stats for the current lookback window.
    ///
    /// # Errors
    ///
    /// Propagates any authentication or request failure.
    pub async fn get_stats(&self) -> Result<Vec<MetricRecord>, SoracomError> {
        self.get_stats_in(StatsWindow::current()).await
    }

    /// Collects operator stats, then group stats, for a given window.
    ///
    /// # Errors
    ///
    /// Propagates any authentication or request failure.
    #[instrument(skip(self))]
    pub async fn get_stats_in(&self, window: StatsWindow) -> Result<Vec<MetricRecord>, SoracomError> {
        let mut records = self.get_operator_stats(window.from, window.to).await?;
        let group_records = self.get_all_group_stats(window.from, window.to).await?;
        records.extend(group_records);

        info!(records = records.len(), "Collected SORACOM Air stats");
        Ok(records)
    }
}

impl UsageSource for UsageApiClient {
    type Error = SoracomError;

    async fn fetch_stats(&self) -> Result<Vec<MetricRecord>, SoracomError> {
        self.get_stats().await
    }
}

// ============================================================================
// Tests
// ============================================================================
