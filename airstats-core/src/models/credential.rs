//! SORACOM credentials.
//!
//! A [`Credential`] holds the long-lived auth key loaded from the secrets
//! store and, once authenticated, the short-lived [`ApiToken`] pair. It only
//! ever lives in memory for the duration of one run.

use std::fmt;

use crate::error::CoreError;
use crate::models::record::dimension_key;

/// Coverage type value that selects the global-coverage API host.
pub const GLOBAL_COVERAGE: &str = "g";

// ============================================================================
// API Token
// ============================================================================

/// Short-lived API key/token pair returned by `POST /auth`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken {
    /// Value for the `X-Soracom-API-Key` header.
    pub api_key: String,
    /// Value for the `X-Soracom-Token` header.
    pub token: String,
}

impl ApiToken {
    /// Creates a new token pair.
    pub fn new(api_key: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken")
            .field("api_key", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Credential
// ============================================================================

/// SORACOM account credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Operator (account) id.
    pub operator_id: String,
    /// Auth key id (`keyId-...`).
    pub auth_key_id: String,
    /// Auth key secret (`secret-...`).
    pub auth_key: String,
    /// Coverage type indicator; `"g"` selects the global-coverage host.
    pub coverage_type: Option<String>,
    /// Token pair, filled on first authenticated call.
    pub api_token: Option<ApiToken>,
}

impl Credential {
    /// Creates a credential without coverage type or token.
    pub fn new(
        operator_id: impl Into<String>,
        auth_key_id: impl Into<String>,
        auth_key: impl Into<String>,
    ) -> Self {
        Self {
            operator_id: operator_id.into(),
            auth_key_id: auth_key_id.into(),
            auth_key: auth_key.into(),
            coverage_type: None,
            api_token: None,
        }
    }

    /// Sets the coverage type.
    #[must_use]
    pub fn with_coverage_type(mut self, coverage_type: impl Into<String>) -> Self {
        self.coverage_type = Some(coverage_type.into());
        self
    }

    /// Sets an already-issued token pair.
    #[must_use]
    pub fn with_api_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }

    /// Returns the coverage type, treating an empty string as absent.
    pub fn coverage_type(&self) -> Option<&str> {
        self.coverage_type.as_deref().filter(|c| !c.is_empty())
    }

    /// Returns true if requests must go to the global-coverage host.
    pub fn uses_global_coverage(&self) -> bool {
        self.coverage_type() == Some(GLOBAL_COVERAGE)
    }

    /// Builds the dimension key for operator stats (`None`) or a group.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingField` if the operator id is empty.
    pub fn dimension_key(&self, group_id: Option<&str>) -> Result<String, CoreError> {
        dimension_key(&self.operator_id, self.coverage_type(), group_id)
    }

    /// Checks that the long-lived fields are all present.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MissingField` naming the first empty field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.operator_id.is_empty() {
            return Err(CoreError::MissingField("operatorId"));
        }
        if self.auth_key_id.is_empty() {
            return Err(CoreError::MissingField("authKeyId"));
        }
        if self.auth_key.is_empty() {
            return Err(CoreError::MissingField("authKey"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("operator_id", &self.operator_id)
            .field("auth_key_id", &self.auth_key_id)
            .field("auth_key", &"[REDACTED]")
            .field("coverage_type", &self.coverage_type)
            .field("api_token", &self.api_token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let credential = Credential::new("OP001", "keyId-abc", "secret-xyz")
            .with_api_token(ApiToken::new("api-key-123", "token-456"));

        let debug = format!("{credential:?}");
        assert!(debug.contains("OP001"));
        assert!(!debug.contains("secret-xyz"));
        assert!(!debug.contains("api-key-123"));
        assert!(!debug.contains("token-456"));
    }

    #[test]
    fn test_global_coverage() {
        let credential = Credential::new("OP001", "k", "s");
        assert!(!credential.uses_global_coverage());
        assert!(!credential.clone().with_coverage_type("").uses_global_coverage());
        assert!(!credential.clone().with_coverage_type("jp").uses_global_coverage());
        assert!(credential.with_coverage_type("g").uses_global_coverage());
    }

    #[test]
    fn test_dimension_key_ignores_empty_coverage() {
        let credential = Credential::new("op1", "k", "s").with_coverage_type("");
        assert_eq!(credential.dimension_key(None).unwrap(), "op1");
        assert_eq!(credential.dimension_key(Some("grp1")).unwrap(), "op1-grp1");
    }

    #[test]
    fn test_validate() {
        assert!(Credential::new("op1", "k", "s").validate().is_ok());
        assert!(matches!(
            Credential::new("", "k", "s").validate(),
            Err(CoreError::MissingField("operatorId"))
        ));
        assert!(matches!(
            Credential::new("op1", "", "s").validate(),
            Err(CoreError::MissingField("authKeyId"))
        ));
        assert!(matches!(
            Credential::new("op1", "k", "").validate(),
            Err(CoreError::MissingField("authKey"))
        ));
    }
}
