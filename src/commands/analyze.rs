//! `analyze`: run the pipeline over captured snapshot files.

use super::pipeline::{Snapshots, process_snapshots, publish};
use crate::cli::AnalyzeArgs;
use crate::config::Config;
use crate::error::{MonitorError, Result};
use chrono::Local;
use std::path::Path;

pub(super) fn read_snapshot(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        MonitorError::UserError(format!(
            "failed to read snapshot '{}': {}",
            path.display(),
            e
        ))
    })
}

pub fn cmd_analyze(config: &Config, args: AnalyzeArgs) -> Result<()> {
    let snapshots = Snapshots {
        locks: read_snapshot(&args.locks)?,
        processes: read_snapshot(&args.monitor)?,
    };
    let output = process_snapshots(
        &snapshots,
        &config.server_process,
        Local::now().naive_local(),
    );

    if args.stdout {
        for line in output.metrics_lines.iter().chain(&output.log_lines) {
            println!("{}", line);
        }
        return Ok(());
    }
    publish(&output, config)
}
