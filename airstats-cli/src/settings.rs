//! Runtime configuration.
//!
//! The only runtime setting is which secret holds the SORACOM credential.
//! AWS region and credentials come from the default provider chain.

use thiserror::Error;
use tracing::debug;

/// Environment variable naming the credential secret.
pub const SECRET_ID_ENV: &str = "SECRET_ID";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The secret id is missing or blank.
    #[error("{0} is not set")]
    MissingSecretId(&'static str),
}

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Secret id (name or ARN) of the credential bundle.
    pub secret_id: String,
}

impl Settings {
    /// Creates settings from an explicit secret id.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSecretId` if the id is blank.
    pub fn new(secret_id: impl Into<String>) -> Result<Self, ConfigError> {
        let secret_id = secret_id.into().trim().to_string();
        if secret_id.is_empty() {
            return Err(ConfigError::MissingSecretId(SECRET_ID_ENV));
        }
        Ok(Self { secret_id })
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSecretId` if `SECRET_ID` is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSecretId` if the lookup has no secret id.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_id = lookup(SECRET_ID_ENV).ok_or(ConfigError::MissingSecretId(SECRET_ID_ENV))?;
        let settings = Self::new(secret_id)?;
        debug!(secret_id = %settings.secret_id, "Loaded settings");
        Ok(settings)
    }
}
