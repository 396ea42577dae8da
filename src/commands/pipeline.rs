//! The single-pass monitoring pipeline.
//!
//! snapshot text -> lock records + process table -> graph -> formatted
//! metrics and log lines -> log append, then atomic metrics replace.

use crate::config::Config;
use crate::error::Result;
use crate::graph::{build_graph, format_blocker_report};
use crate::locks::normalize;
use crate::output::{append_log, format_log, format_metrics, stage_metrics, timestamp_lines};
use crate::processes::parse_processes;
use chrono::NaiveDateTime;

/// The two raw snapshots of one run.
#[derive(Debug, Clone)]
pub struct Snapshots {
    pub locks: String,
    pub processes: String,
}

/// Rendered results of one run, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutput {
    pub metrics_lines: Vec<String>,
    pub log_lines: Vec<String>,
}

/// Run the core over a pair of snapshots.
///
/// A malformed lock snapshot is reported and treated as empty, so a scrape
/// still finds a complete (zero-valued) metrics file.
pub fn process_snapshots(snapshots: &Snapshots, server_process: &str, now: NaiveDateTime) -> RunOutput {
    let records = normalize(&snapshots.locks, server_process).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring lock snapshot");
        Vec::new()
    });
    let processes = parse_processes(&snapshots.processes);
    tracing::debug!(locks = records.len(), processes = processes.len(), "parsed snapshots");

    let metrics = build_graph(&records, &processes);

    let mut log_lines = format_log(&metrics, now);
    log_lines.extend(timestamp_lines(&format_blocker_report(&metrics), now));

    RunOutput {
        metrics_lines: format_metrics(&metrics),
        log_lines,
    }
}

/// Stage the metrics file, append the log lines, then publish the metrics.
///
/// A missing or unwritable metrics directory fails the run before the log is
/// touched; the atomic rename is the final step.
pub fn publish(output: &RunOutput, config: &Config) -> Result<()> {
    let staged = stage_metrics(
        &output.metrics_lines,
        &config.metrics_root,
        &config.metrics_file,
    )?;
    append_log(&output.log_lines, &config.log_file)?;

    let path = staged.target().to_path_buf();
    staged.commit()?;
    tracing::info!(path = %path.display(), "published lock metrics");
    Ok(())
}
