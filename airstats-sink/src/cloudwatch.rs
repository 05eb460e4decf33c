//! Amazon CloudWatch backend.

use async_trait::async_trait;
use aws_sdk_cloudwatch::Client;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{
    Dimension as CwDimension, MetricDatum as CwMetricDatum, StandardUnit,
};
use tracing::{debug, warn};

use crate::backend::{MetricDatum, MetricsBackend};
use crate::error::SinkError;

/// Metrics backend backed by CloudWatch `PutMetricData`.
#[derive(Debug, Clone)]
pub struct CloudWatchBackend {
    client: Client,
}

impl CloudWatchBackend {
    /// Creates a CloudWatch client from a shared AWS config.
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

/// Converts a datum into the SDK type.
fn to_cloudwatch(datum: MetricDatum) -> Result<CwMetricDatum, SinkError> {
    let dimensions = datum
        .dimensions
        .into_iter()
        .map(|d| {
            Ok::<_, SinkError>(
                CwDimension::builder()
                    .name(d.name)
                    .value(d.value)
                    .build(),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CwMetricDatum::builder()
        .metric_name(datum.metric_name)
        .set_dimensions(Some(dimensions))
        .timestamp(DateTime::from_millis(datum.timestamp.timestamp_millis()))
        .value(datum.value)
        .unit(StandardUnit::from(datum.unit))
        .build())
}

#[async_trait]
impl MetricsBackend for CloudWatchBackend {
    async fn put_metric_data(&self, namespace: &str, data: Vec<MetricDatum>) -> Result<(), SinkError> {
        let count = data.len();
        let metric_data = data
            .into_iter()
            .map(to_cloudwatch)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(namespace = %namespace, data = count, "Putting metric data");

        self.client
            .put_metric_data()
            .namespace(namespace)
            .set_metric_data(Some(metric_data))
            .send()
            .await
            .map_err(|e| {
                warn!(namespace = %namespace, error = %DisplayErrorContext(&e), "PutMetricData failed");
                SinkError::MetricWrite(DisplayErrorContext(&e).to_string())
            })?;

        Ok(())
    }
}
