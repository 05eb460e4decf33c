//! Secrets store access.
//!
//! The pipeline only needs the read side of the secrets store: given a secret
//! id, return its string payload. [`SecretsApi`] is that contract, and
//! [`AwsSecretsManager`] implements it on top of AWS Secrets Manager.
//!
//! Nothing is cached here. Each run reads the secret fresh.

use async_trait::async_trait;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, SdkError};
use tracing::{debug, warn};

use crate::error::SecretsError;

// ============================================================================
// Secrets API Trait
// ============================================================================

/// Read access to a secrets store.
#[async_trait]
pub trait SecretsApi: Send + Sync {
    /// Get the string payload of a secret.
    ///
    /// # Arguments
    /// * `secret_id` - Secret name or ARN
    ///
    /// # Returns
    /// * `Ok(payload)` - The secret's string value
    /// * `Err(e)` - The secret is missing, empty, or the call failed
    async fn get_secret_string(&self, secret_id: &str) -> Result<String, SecretsError>;
}

// ============================================================================
// AWS Secrets Manager Implementation
// ============================================================================

/// Secrets store backed by AWS Secrets Manager.
#[derive(Debug, Clone)]
pub struct AwsSecretsManager {
    client: Client,
}

impl AwsSecretsManager {
    /// Creates a Secrets Manager client from a shared AWS config.
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl SecretsApi for AwsSecretsManager {
    async fn get_secret_string(&self, secret_id: &str) -> Result<String, SecretsError> {
        debug!(secret_id = %secret_id, "Getting secret value");

        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|e| {
                warn!(secret_id = %secret_id, error = %DisplayErrorContext(&e), "Failed to get secret value");
                match e {
                    SdkError::ServiceError(ref service)
                        if service.err().is_resource_not_found_exception() =>
                    {
                        SecretsError::NotFound(secret_id.to_string())
                    }
                    other => SecretsError::Service(DisplayErrorContext(&other).to_string()),
                }
            })?;

        match output.secret_string() {
            Some(payload) if !payload.is_empty() => {
                debug!(secret_id = %secret_id, "Secret found");
                Ok(payload.to_string())
            }
            _ => Err(SecretsError::EmptyPayload(secret_id.to_string())),
        }
    }
}
