//! Run command - collect stats and publish them to CloudWatch.

use std::sync::Arc;

use airstats_cli::{Orchestrator, PrintSink, Settings};
use airstats_sink::{CloudWatchBackend, MetricsSink, NAMESPACE};
use anyhow::Result;
use aws_config::BehaviorVersion;
use clap::Args;
use tracing::debug;

use crate::Cli;

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Secrets Manager secret holding the SORACOM credential.
    #[arg(long, env = "SECRET_ID")]
    pub secret_id: Option<String>,

    /// Print the records instead of publishing them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Runs the run command.
pub async fn run(args: &RunArgs, cli: &Cli) -> Result<()> {
    // Without a subcommand the args are defaulted and clap never read SECRET_ID.
    let settings = match &args.secret_id {
        Some(id) => Settings::new(id.clone())?,
        None => Settings::from_env()?,
    };

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    debug!(region = ?config.region(), "Loaded AWS config");

    if args.dry_run {
        let sink = PrintSink::new(cli.format, cli.pretty, !cli.no_color);
        Orchestrator::for_aws(&config, sink)?
            .run(&settings.secret_id)
            .await?;
        return Ok(());
    }

    let sink = MetricsSink::new(Arc::new(CloudWatchBackend::new(&config)));
    let count = Orchestrator::for_aws(&config, sink)?
        .run(&settings.secret_id)
        .await?;

    if !cli.quiet {
        println!("Published {count} data points to {NAMESPACE}");
    }

    Ok(())
}
