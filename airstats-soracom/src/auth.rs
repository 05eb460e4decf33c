//! SORACOM authentication session.
//!
//! `POST /auth` exchanges the long-lived auth key for an API key/token pair.
//! The pair is requested at most once per session and attached to every
//! subsequent request as `X-Soracom-API-Key` / `X-Soracom-Token`.

use airstats_core::{ApiToken, Credential};
use airstats_fetch::HttpClient;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument, warn};

use crate::endpoint::{AUTH_ENDPOINT, Endpoints};
use crate::error::SoracomError;

/// API key header.
pub const API_KEY_HEADER: &str = "x-soracom-api-key";

/// Token header.
pub const TOKEN_HEADER: &str = "x-soracom-token";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthRequest<'a> {
    auth_key_id: &'a str,
    auth_key: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    api_key: String,
    token: String,
}

// ============================================================================
// Auth Session
// ============================================================================

/// Authenticated session against one SORACOM API host.
///
/// The token pair is held in a [`OnceCell`], so it is written at most once and
/// concurrent first callers wait on the same `/auth` request.
#[derive(Debug)]
pub struct AuthSession {
    http: HttpClient,
    base_url: String,
    credential: Credential,
    token: OnceCell<ApiToken>,
}

impl AuthSession {
    /// Creates a session for a credential.
    ///
    /// A credential that already carries a token pair never triggers `/auth`.
    pub fn new(http: HttpClient, endpoints: &Endpoints, mut credential: Credential) -> Self {
        let base_url = endpoints.base_for(&credential).to_string();
        let token = OnceCell::new_with(credential.api_token.take());

        Self {
            http,
            base_url,
            credential,
            token,
        }
    }

    /// Base URL used for every request of this session.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The long-lived credential (token pair excluded).
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns true once a token pair is cached.
    pub fn is_authenticated(&self) -> bool {
        self.token.initialized()
    }

    /// Returns the cached token pair, authenticating first if needed.
    ///
    /// # Errors
    ///
    /// Returns `SoracomError::Authentication` if `/auth` answers with a
    /// non-success status or a body without `apiKey`/`token`.
    pub async fn ensure_authenticated(&self) -> Result<&ApiToken, SoracomError> {
        self.token.get_or_try_init(|| self.authenticate()).await
    }

    /// Builds the headers for a data request, authenticating first if needed.
    ///
    /// # Errors
    ///
    /// Propagates authentication failures.
    pub async fn authorized_headers(&self) -> Result<HeaderMap, SoracomError> {
        let token = self.ensure_authenticated().await?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(API_KEY_HEADER), header_value(&token.api_key)?);
        headers.insert(HeaderName::from_static(TOKEN_HEADER), header_value(&token.token)?);
        Ok(headers)
    }

    #[instrument(skip(self), fields(operator_id = %self.credential.operator_id))]
    async fn authenticate(&self) -> Result<ApiToken, SoracomError> {
        debug!("Requesting SORACOM API token");

        let url = format!("{}{}", self.base_url, AUTH_ENDPOINT);
        let body = AuthRequest {
            auth_key_id: &self.credential.auth_key_id,
            auth_key: &self.credential.auth_key,
        };

        let response = self.http.post_json(&url, &body).await?;
        let status = response.status();

        if !status.is_success() {
            warn!(status = %status, "SORACOM rejected auth key");
            return Err(SoracomError::Authentication(format!("HTTP {status}")));
        }

        let body = response.text().await?;
        let auth: AuthResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse auth response");
            SoracomError::Authentication(format!("JSON error: {e}"))
        })?;

        info!("Authenticated with SORACOM API");
        Ok(ApiToken::new(auth.api_key, auth.token))
    }
}

fn header_value(value: &str) -> Result<HeaderValue, SoracomError> {
    HeaderValue::from_str(value)
        .map_err(|e| SoracomError::Authentication(format!("Invalid token header: {e}")))
}

// ============================================================================
// Tests
// ============================================================================
