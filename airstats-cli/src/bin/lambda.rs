//! AWS Lambda entry point.
//!
//! Each invocation ignores its event payload, loads the credential named by
//! `SECRET_ID`, and publishes the current lookback window to CloudWatch.

use std::sync::Arc;

use airstats_cli::{Orchestrator, Settings, logging};
use airstats_sink::{CloudWatchBackend, MetricsSink};
use aws_config::BehaviorVersion;
use lambda_runtime::{Error, LambdaEvent, service_fn};
use serde_json::Value;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    logging::init_lambda();

    let settings = Settings::from_env()?;
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let sink = MetricsSink::new(Arc::new(CloudWatchBackend::new(&config)));
    let orchestrator = Arc::new(Orchestrator::for_aws(&config, sink)?);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let orchestrator = Arc::clone(&orchestrator);
        let secret_id = settings.secret_id.clone();
        async move {
            info!(request_id = %event.context.request_id, "Invocation started");
            orchestrator.run(&secret_id).await?;
            Ok::<(), Error>(())
        }
    }))
    .await
}
