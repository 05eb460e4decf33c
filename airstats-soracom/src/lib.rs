// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # airstats SORACOM
//!
//! Client for the SORACOM Air usage statistics API.
//!
//! - **Endpoint**: host selection by coverage type
//! - **Auth**: `/auth` token exchange, cached for the session
//! - **Api**: operator stats, group listing, concurrent group stats
//! - **Parser**: response types and normalization into records
//!
//! | Endpoint | Method | Used for |
//! |----------|--------|----------|
//! | `/auth` | POST | API key/token exchange |
//! | `/stats/air/operators/{id}` | GET | Account-level daily usage |
//! | `/groups` | GET | Group listing |
//! | `/stats/air/groups/{id}` | GET | Group-level daily usage |
//!
//! ## Usage
//!
//! ```ignore
//! use airstats_soracom::UsageApiClient;
//!
//! let client = UsageApiClient::new(credential)?;
//! let records = client.get_stats().await?;
//! ```

pub mod api;
pub mod auth;
pub mod endpoint;
pub mod error;
pub mod parser;

pub use api::{LOOKBACK_SECS, StatsWindow, UsageApiClient};
pub use auth::AuthSession;
pub use endpoint::{API_BASE, Endpoints, GLOBAL_API_BASE};
pub use error::SoracomError;
pub use parser::{AirStatsEntry, GroupSummary};
