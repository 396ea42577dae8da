//! Timestamped blocking log.
//!
//! Unlike the metrics file, the log is append-only and shared between runs;
//! concurrent runs may interleave lines.

use crate::error::{MonitorError, Result};
use crate::graph::RunMetrics;
use chrono::NaiveDateTime;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Timestamp layout of every log line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Prefix each blocking message with `now`, or emit a single
/// `no blocked commands` line when nothing is blocked.
pub fn format_log(metrics: &RunMetrics, now: NaiveDateTime) -> Vec<String> {
    let prefix = now.format(TIMESTAMP_FORMAT).to_string();

    if metrics.messages().is_empty() {
        return vec![format!("{} no blocked commands", prefix)];
    }
    metrics
        .messages()
        .iter()
        .map(|m| format!("{} {}", prefix, m))
        .collect()
}

/// Prefix arbitrary lines (such as the blocker report) with `now`.
pub fn timestamp_lines(lines: &[String], now: NaiveDateTime) -> Vec<String> {
    let prefix = now.format(TIMESTAMP_FORMAT).to_string();
    lines.iter().map(|l| format!("{} {}", prefix, l)).collect()
}

/// Append lines to the log file, creating it if needed.
pub fn append_log(lines: &[String], log_file: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            MonitorError::WriteError(format!(
                "failed to open log file '{}': {}",
                log_file.display(),
                e
            ))
        })?;

    let mut content = lines.join("\n");
    content.push('\n');

    file.write_all(content.as_bytes()).map_err(|e| {
        MonitorError::WriteError(format!(
            "failed to append to log file '{}': {}",
            log_file.display(),
            e
        ))
    })
}
