// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! airstats CLI - SORACOM Air usage to CloudWatch from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Collect and publish (SECRET_ID from the environment)
//! airstats
//!
//! # Explicit secret
//! airstats run --secret-id SoracomStatsMonitor-Credential
//!
//! # Print instead of publishing
//! airstats run --dry-run --format json --pretty
//! ```

mod commands;

use airstats_cli::{OutputFormat, logging};
use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::run;

// ============================================================================
// CLI Definition
// ============================================================================

/// airstats CLI - SORACOM Air usage metrics.
#[derive(Parser)]
#[command(name = "airstats")]
#[command(about = "Publish SORACOM Air usage to CloudWatch")]
#[command(long_about = r"
airstats collects SORACOM Air upload and download totals for the account and
every group over the last two days, and writes them to CloudWatch under the
SORACOM/AIR namespace.

The credential bundle is read from the Secrets Manager secret named by
--secret-id or SECRET_ID.

Examples:
  airstats                          # Collect and publish
  airstats run --dry-run            # Print instead of publishing
  airstats run --dry-run -f json    # JSON output
")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'run' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format for dry runs (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Collect stats and publish them (default if no command specified).
    #[command(visible_alias = "r")]
    Run(run::RunArgs),
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_cli(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Run(args)) => run::run(args, &cli).await,
        None => {
            // Default to run command
            run::run(&run::RunArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
