// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # airstats Sink
//!
//! Publishes normalized usage records as CloudWatch metrics.
//!
//! This crate provides:
//!
//! - **MetricsSink**: Maps records to metric data and writes one batch
//! - **MetricsBackend**: The "put metric data" write contract
//! - **CloudWatchBackend**: `PutMetricData` over the AWS SDK
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use airstats_sink::{CloudWatchBackend, MetricsSink};
//!
//! let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//! let sink = MetricsSink::new(Arc::new(CloudWatchBackend::new(&config)));
//! sink.save_stats(&records).await?;
//! ```

pub mod backend;
pub mod cloudwatch;
pub mod error;
pub mod sink;

pub use backend::{Dimension, MetricDatum, MetricsBackend, UNIT_BYTES};
pub use cloudwatch::CloudWatchBackend;
pub use error::SinkError;
pub use sink::{DIMENSION_NAME, MetricsSink, NAMESPACE};
