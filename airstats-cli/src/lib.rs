// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

//! # airstats CLI
//!
//! Shared wiring for the `airstats` command-line tool and the
//! `airstats-lambda` handler.
//!
//! - **settings**: Which secret holds the SORACOM credential
//! - **orchestrator**: Load credential, collect stats, publish them
//! - **output**: Dry-run printing in text or JSON
//! - **logging**: Subscriber setup for both entry points

pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod settings;

pub use orchestrator::{Orchestrator, OrchestratorError, publish};
pub use output::{OutputError, OutputFormat, PrintSink};
pub use settings::{ConfigError, SECRET_ID_ENV, Settings};
