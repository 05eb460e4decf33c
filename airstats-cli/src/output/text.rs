//! Text output formatting with colors.

use airstats_core::MetricRecord;
use airstats_sink::NAMESPACE;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a batch as one line per data point.
    pub fn format_records(&self, records: &[MetricRecord]) -> String {
        let mut lines = Vec::with_capacity(records.len() + 1);

        lines.push(format!(
            "{} {}",
            self.bold(NAMESPACE),
            self.dim(&format!("({} data points)", records.len()))
        ));

        if records.is_empty() {
            lines.push(format!("  {}", self.dim("No stats in the lookback window")));
            return lines.join("\n");
        }

        let key_width = records
            .iter()
            .map(|r| r.dimension_key.len())
            .max()
            .unwrap_or(0);

        for record in records {
            // Pad before coloring so ANSI codes don't skew the columns.
            let key = format!("{:<key_width$}", record.dimension_key);
            let metric = format!("{:<21}", record.metric_name.as_str());
            lines.push(format!(
                "  {}  {}  {}  {:>10}",
                key,
                self.cyan(&metric),
                self.format_time(record),
                self.format_bytes(record.value)
            ));
        }

        lines.join("\n")
    }

    fn format_time(&self, record: &MetricRecord) -> String {
        match record.timestamp() {
            Some(ts) => ts.format("%Y-%m-%d %H:%M UTC").to_string(),
            None => self.dim(&record.timestamp_secs.to_string()),
        }
    }

    /// Formats a byte count with a binary unit suffix.
    #[allow(clippy::cast_precision_loss, clippy::unused_self)]
    pub fn format_bytes(&self, bytes: u64) -> String {
        const KB: f64 = 1024.0;
        let n = bytes as f64;
        if n >= KB * KB * KB {
            format!("{:.1} GB", n / (KB * KB * KB))
        } else if n >= KB * KB {
            format!("{:.1} MB", n / (KB * KB))
        } else if n >= KB {
            format!("{:.1} KB", n / KB)
        } else {
            format!("{bytes} B")
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn cyan(&self, text: &str) -> String {
        if self.use_colors {
            format!("{CYAN}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
