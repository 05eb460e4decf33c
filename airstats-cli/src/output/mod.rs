//! Output formatting for dry runs.

mod json;
mod text;


use std::io::Write;

use airstats_core::{MetricRecord, StatsSink};
use clap::ValueEnum;
use thiserror::Error;

pub use json::{BatchOutput, JsonFormatter, RecordOutput};
pub use text::TextFormatter;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// Errors from rendering or writing output.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

// ============================================================================
// Print Sink
// ============================================================================

/// Sink that prints the batch to stdout instead of publishing it.
#[derive(Debug, Clone, Copy)]
pub struct PrintSink {
    format: OutputFormat,
    pretty: bool,
    use_colors: bool,
}

impl PrintSink {
    /// Creates a print sink.
    pub fn new(format: OutputFormat, pretty: bool, use_colors: bool) -> Self {
        Self {
            format,
            pretty,
            use_colors,
        }
    }

    /// Renders the batch in the configured format.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, records: &[MetricRecord]) -> Result<String, OutputError> {
        match self.format {
            OutputFormat::Text => Ok(TextFormatter::new(self.use_colors).format_records(records)),
            OutputFormat::Json => JsonFormatter::new(self.pretty).format_records(records),
        }
    }
}

impl StatsSink for PrintSink {
    type Error = OutputError;

    async fn save_stats(&self, records: &[MetricRecord]) -> Result<(), OutputError> {
        let rendered = self.render(records)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{rendered}")?;
        Ok(())
    }
}
