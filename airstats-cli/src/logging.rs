//! Logging setup.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initializes logging for the `airstats` CLI.
///
/// Logs go to stderr so dry-run output on stdout stays machine-readable.
pub fn init_cli(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("airstats=debug,info")
    } else {
        EnvFilter::new("airstats=info,warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Initializes logging for the Lambda handler.
///
/// CloudWatch Logs timestamps every line already, and ANSI codes would show up
/// verbatim there. `RUST_LOG` overrides the default filter.
pub fn init_lambda() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("airstats=info,warn"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(false),
        )
        .with(filter)
        .init();
}
