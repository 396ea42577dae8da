//! `collect`: capture live snapshots and publish.

use super::pipeline::{Snapshots, process_snapshots, publish};
use crate::capture::{capture_locks, capture_processes};
use crate::config::Config;
use crate::error::Result;
use chrono::Local;

pub fn cmd_collect(config: &Config) -> Result<()> {
    let now = Local::now().naive_local();

    // Either capture failing aborts the run before anything is written.
    let snapshots = Snapshots {
        locks: capture_locks(config)?,
        processes: capture_processes(config)?,
    };

    let output = process_snapshots(&snapshots, &config.server_process, now);
    publish(&output, config)
}
