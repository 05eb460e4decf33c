//! Outbound HTTP for the SORACOM API.
//!
//! [`HttpClient`] wraps `reqwest` with a per-request span and an optional host
//! allowlist. Production clients only talk to `*.soracom.io`; tests build an
//! unrestricted client and point it at a local mock server.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("airstats/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// `reqwest` client with tracing and an optional host allowlist.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Unrestricted client with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Request` if the TLS backend fails to initialize.
    pub fn new() -> Result<Self, HttpError> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// Unrestricted client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Request` if the TLS backend fails to initialize.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            inner,
            allowed_domains: None,
        })
    }

    /// Client that refuses any host outside `domains` and their subdomains.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Request` if the TLS backend fails to initialize.
    pub fn with_allowed_domains(domains: Vec<String>) -> Result<Self, HttpError> {
        Ok(Self {
            allowed_domains: Some(domains),
            ..Self::new()?
        })
    }

    fn check_host(&self, url: &str) -> Result<(), HttpError> {
        let Some(domains) = &self.allowed_domains else {
            return Ok(());
        };

        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl(format!("{url} has no host")))?;

        let permitted = domains.iter().any(|domain| {
            host.strip_suffix(domain.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.ends_with('.'))
        });

        if permitted {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// GET with query parameters and request headers.
    #[instrument(skip(self, query, headers), fields(url = %url))]
    pub async fn get_with_headers(
        &self,
        url: &str,
        query: &[(&str, String)],
        headers: HeaderMap,
    ) -> Result<Response, HttpError> {
        self.check_host(url)?;

        let response = self
            .inner
            .get(url)
            .query(query)
            .headers(headers)
            .send()
            .await?;

        debug!(status = %response.status(), "GET completed");
        Ok(response)
    }

    /// POST with a JSON body.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<Response, HttpError> {
        self.check_host(url)?;

        let response = self.inner.post(url).json(body).send().await?;

        debug!(status = %response.status(), "POST completed");
        Ok(response)
    }
}

// ============================================================================
// Response Extensions
// ============================================================================

/// Rate-limit helpers on responses.
pub trait ResponseExt {
    /// True for HTTP 429.
    fn is_rate_limited(&self) -> bool;

    /// `Retry-After` in seconds, when given as an integer.
    fn retry_after_secs(&self) -> Option<u64>;
}

impl ResponseExt for Response {
    fn is_rate_limited(&self) -> bool {
        self.status() == StatusCode::TOO_MANY_REQUESTS
    }

    fn retry_after_secs(&self) -> Option<u64> {
        self.headers()
            .get(RETRY_AFTER)?
            .to_str()
            .ok()?
            .trim()
            .parse()
            .ok()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn soracom_only() -> HttpClient {
        HttpClient::with_allowed_domains(vec!["soracom.io".to_string()]).unwrap()
    }

    #[test]
    fn test_api_hosts_are_allowed() {
        let client = soracom_only();
        assert!(client.check_host("https://api.soracom.io/v1/auth").is_ok());
        assert!(client.check_host("https://g.api.soracom.io/v1/groups").is_ok());
        assert!(client.check_host("https://soracom.io/").is_ok());
    }

    #[test]
    fn test_lookalike_hosts_are_rejected() {
        let client = soracom_only();
        assert!(matches!(
            client.check_host("https://evil.com/steal"),
            Err(HttpError::DomainNotAllowed(host)) if host == "evil.com"
        ));
        assert!(client.check_host("https://soracom.io.evil.com/").is_err());
        assert!(client.check_host("https://notsoracom.io/").is_err());
    }

    #[test]
    fn test_unrestricted_client_allows_localhost() {
        let client = HttpClient::new().unwrap();
        assert!(client.check_host("http://127.0.0.1:8080/auth").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            soracom_only().check_host("not-a-valid-url"),
            Err(HttpError::InvalidUrl(_))
        ));
    }
}
