//! SORACOM credential loading.
//!
//! The credential bundle is stored as a JSON document in the secrets store:
//!
//! ```json
//! {
//!   "operatorId": "OP0012345678",
//!   "authKeyId": "keyId-...",
//!   "authKey": "secret-...",
//!   "coverageType": "g"
//! }
//! ```
//!
//! `coverageType` may be omitted or empty, which selects the default host.

use std::sync::Arc;

use airstats_core::Credential;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::error::FetchError;
use crate::host::secrets::SecretsApi;

// ============================================================================
// Secret Document
// ============================================================================

/// Credential bundle as stored in the secrets store.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretDocument {
    /// Operator id.
    pub operator_id: String,
    /// Auth key id.
    pub auth_key_id: String,
    /// Auth key secret.
    pub auth_key: String,
    /// Coverage type indicator.
    #[serde(default)]
    pub coverage_type: Option<String>,
}

impl SecretDocument {
    /// Converts into a validated credential.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::SecretFormat` if any required field is empty.
    pub fn into_credential(self) -> Result<Credential, FetchError> {
        let mut credential = Credential::new(self.operator_id, self.auth_key_id, self.auth_key);
        credential.coverage_type = self.coverage_type;
        credential.validate()?;
        Ok(credential)
    }
}

// ============================================================================
// Credential Loader
// ============================================================================

/// Loads the SORACOM credential from a secrets store.
#[derive(Clone)]
pub struct CredentialLoader {
    secrets: Arc<dyn SecretsApi>,
}

impl CredentialLoader {
    /// Creates a loader reading from the given secrets store.
    pub fn new(secrets: Arc<dyn SecretsApi>) -> Self {
        Self { secrets }
    }

    /// Loads and parses the credential stored under `secret_id`.
    ///
    /// # Errors
    ///
    /// - `FetchError::SecretRetrieval` if the secrets store call fails
    /// - `FetchError::SecretFormat` if the payload is not a valid bundle
    #[instrument(skip(self))]
    pub async fn load(&self, secret_id: &str) -> Result<Credential, FetchError> {
        let payload = self.secrets.get_secret_string(secret_id).await?;

        let credential = Self::parse(&payload).inspect_err(|e| {
            warn!(error = %e, "Secret payload is not a SORACOM credential");
        })?;

        info!(
            operator_id = %credential.operator_id,
            coverage_type = credential.coverage_type().unwrap_or(""),
            "Loaded SORACOM credential"
        );
        Ok(credential)
    }

    /// Parses a credential bundle.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::SecretFormat` if the JSON is malformed or a
    /// required field is missing or empty.
    pub fn parse(payload: &str) -> Result<Credential, FetchError> {
        let document: SecretDocument = serde_json::from_str(payload)?;
        document.into_credential()
    }
}

impl std::fmt::Debug for CredentialLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialLoader").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
