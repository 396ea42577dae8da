//! Correlation of lock records with the process table.

use crate::classify::{ResourceClass, classify};
use crate::locks::{LockMode, LockRecord};
use crate::processes::{ProcessInfo, ProcessTable};
use std::collections::{BTreeMap, BTreeSet};

/// Placeholder for process details missing from the monitor snapshot.
pub const UNKNOWN: &str = "unknown";

/// Lock counters of a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockCounts {
    pub db_read: u64,
    pub db_write: u64,
    pub client_entity_read: u64,
    pub client_entity_write: u64,
    pub meta_read: u64,
    pub meta_write: u64,
    /// Distinct (blocker, blocked) pairs.
    pub blocked_commands: u64,
}

/// A process observed blocking at least one other process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockerAggregate {
    pub pid: String,
    pub user: String,
    pub cmd: String,
    pub elapsed: String,
    /// Label of the resource from the first lock this blocker was seen on.
    pub resource: String,
    pub blocked_pids: BTreeSet<String>,
}

/// Everything derived from one pair of snapshots.
///
/// Counters can only be changed by [`build_graph`]; callers get copies.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    counts: LockCounts,
    messages: Vec<String>,
    blockers: BTreeMap<String, BlockerAggregate>,
}

impl RunMetrics {
    pub fn counts(&self) -> LockCounts {
        self.counts
    }

    /// Blocking messages, in snapshot order.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Blocker aggregates keyed by blocker pid.
    pub fn blockers(&self) -> &BTreeMap<String, BlockerAggregate> {
        &self.blockers
    }

    fn count_lock(&mut self, record: &LockRecord, class: &ResourceClass) {
        let (read, write) = match &record.mode {
            LockMode::Read => (1, 0),
            LockMode::Write => (0, 1),
            LockMode::Other(mode) => {
                tracing::trace!(pid = %record.pid, mode = %mode, "lock mode not counted");
                return;
            }
        };

        if class.client_entity {
            self.counts.client_entity_read += read;
            self.counts.client_entity_write += write;
        }
        if class.meta {
            self.counts.meta_read += read;
            self.counts.meta_write += write;
        }
        if !class.label.is_empty() {
            self.counts.db_read += read;
            self.counts.db_write += write;
        }
    }

    fn record_block(
        &mut self,
        record: &LockRecord,
        blocker_pid: &str,
        label: &str,
        processes: &ProcessTable,
    ) {
        let blocker = processes.get(blocker_pid);
        let aggregate = self
            .blockers
            .entry(blocker_pid.to_string())
            .or_insert_with(|| BlockerAggregate {
                pid: blocker_pid.to_string(),
                user: field_or_unknown(blocker, |p| &p.user),
                cmd: field_or_unknown(blocker, |p| &p.cmd),
                elapsed: field_or_unknown(blocker, |p| &p.elapsed),
                resource: label.to_string(),
                blocked_pids: BTreeSet::new(),
            });

        if !aggregate.blocked_pids.insert(record.pid.clone()) {
            return;
        }
        self.counts.blocked_commands += 1;

        let blocked = processes.get(&record.pid);
        self.messages.push(format!(
            "pid {}, user {}, cmd {}, table {}, blocked by pid {}, user {}, cmd {}, args {}",
            record.pid,
            field_or_unknown(blocked, |p| &p.user),
            field_or_unknown(blocked, |p| &p.cmd),
            label,
            blocker_pid,
            field_or_unknown(blocker, |p| &p.user),
            field_or_unknown(blocker, |p| &p.cmd),
            field_or_unknown(blocker, |p| &p.args),
        ));
    }
}

fn field_or_unknown(info: Option<&ProcessInfo>, field: impl Fn(&ProcessInfo) -> &String) -> String {
    info.map(|p| field(p).clone())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Classify every lock record and reconstruct who blocks whom.
///
/// Records are processed in snapshot order, so messages follow the order of
/// the lock records that produced them. A blocked pid is counted once per
/// blocker no matter how many of its locks that blocker holds up.
pub fn build_graph(records: &[LockRecord], processes: &ProcessTable) -> RunMetrics {
    let mut metrics = RunMetrics::default();

    for record in records {
        let class = classify(&record.path);
        tracing::trace!(
            command = %record.command,
            pid = %record.pid,
            path = %record.path,
            category = ?class.category(),
            "classified lock"
        );
        metrics.count_lock(record, &class);

        if let Some(blocker_pid) = &record.blocker_pid {
            metrics.record_block(record, blocker_pid, &class.label, processes);
        }
    }

    metrics
}
