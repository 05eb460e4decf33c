//! SORACOM API host selection.
//!
//! Accounts on the global coverage (`coverageType = "g"`) are served by
//! `g.api.soracom.io`; everything else goes to `api.soracom.io`. The choice
//! is made once per session and applied to every request, `/auth` included.

use airstats_core::Credential;

// ============================================================================
// Constants
// ============================================================================

/// Default (Japan coverage) API base URL.
pub const API_BASE: &str = "https://api.soracom.io/v1";

/// Global coverage API base URL.
pub const GLOBAL_API_BASE: &str = "https://g.api.soracom.io/v1";

/// Domains the production HTTP client may talk to.
pub const ALLOWED_DOMAINS: &[&str] = &["soracom.io"];

/// Auth endpoint.
pub const AUTH_ENDPOINT: &str = "/auth";

/// Groups endpoint.
pub const GROUPS_ENDPOINT: &str = "/groups";

/// Operator Air stats endpoint, `{operator_id}` appended.
pub const OPERATOR_STATS_ENDPOINT: &str = "/stats/air/operators";

/// Group Air stats endpoint, `{group_id}` appended.
pub const GROUP_STATS_ENDPOINT: &str = "/stats/air/groups";

// ============================================================================
// Endpoints
// ============================================================================

/// The pair of base URLs a session chooses from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Base URL for every coverage type except global.
    pub default_base: String,
    /// Base URL for the global coverage type.
    pub global_base: String,
}

impl Endpoints {
    /// Creates endpoints from explicit base URLs.
    pub fn new(default_base: impl Into<String>, global_base: impl Into<String>) -> Self {
        Self {
            default_base: default_base.into(),
            global_base: global_base.into(),
        }
    }

    /// Returns the base URL a credential's requests go to.
    pub fn base_for(&self, credential: &Credential) -> &str {
        if credential.uses_global_coverage() {
            &self.global_base
        } else {
            &self.default_base
        }
    }

    /// Returns the allowlist for the production HTTP client.
    pub fn allowed_domains() -> Vec<String> {
        ALLOWED_DOMAINS.iter().map(ToString::to_string).collect()
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(API_BASE, GLOBAL_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credential() -> Credential {
        Credential::new("op1", "k", "s")
    }

    #[test]
    fn test_global_coverage_selects_global_host() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.base_for(&credential().with_coverage_type("g")), GLOBAL_API_BASE);
    }

    #[test]
    fn test_other_coverage_selects_default_host() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.base_for(&credential()), API_BASE);
        for coverage in ["", "jp", "G"] {
            assert_eq!(endpoints.base_for(&credential().with_coverage_type(coverage)), API_BASE);
        }
    }
}
