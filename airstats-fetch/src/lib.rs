// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # airstats Fetch
//!
//! Host APIs used by the airstats pipeline before any SORACOM call is made.
//!
//! ## Host APIs
//!
//! The [`host`] module provides abstractions for system interactions:
//!
//! - [`host::http`] - HTTP client with tracing and domain allowlist
//! - [`host::secrets`] - Secrets store access (AWS Secrets Manager)
//!
//! ## Credentials
//!
//! - [`credentials::CredentialLoader`] - Loads and parses the SORACOM
//!   credential bundle from the secrets store
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use airstats_fetch::{AwsSecretsManager, CredentialLoader};
//!
//! let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//! let loader = CredentialLoader::new(Arc::new(AwsSecretsManager::new(&config)));
//! let credential = loader.load("soracom-credential").await?;
//! ```

pub mod credentials;
pub mod error;
pub mod host;

// Re-export key types at crate root

// Errors
pub use error::{FetchError, HttpError, SecretsError};

// Host APIs
pub use host::{
    http::{HttpClient, ResponseExt},
    secrets::{AwsSecretsManager, SecretsApi},
};

// Credentials
pub use credentials::{CredentialLoader, SecretDocument};
