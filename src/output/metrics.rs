//! Prometheus text exposition of the lock counters.

use crate::error::Result;
use crate::fs::StagedWrite;
use crate::graph::{LockCounts, RunMetrics};
use std::path::Path;

/// One exported gauge.
struct Gauge {
    name: &'static str,
    help: &'static str,
    value: fn(&LockCounts) -> u64,
}

/// Gauges in the order they appear in the metrics file.
const GAUGES: [Gauge; 7] = [
    Gauge {
        name: "p4_locks_db_read",
        help: "Database read locks",
        value: |c| c.db_read,
    },
    Gauge {
        name: "p4_locks_db_write",
        help: "Database write locks",
        value: |c| c.db_write,
    },
    Gauge {
        name: "p4_locks_cliententity_read",
        help: "clientEntity read locks",
        value: |c| c.client_entity_read,
    },
    Gauge {
        name: "p4_locks_cliententity_write",
        help: "clientEntity write locks",
        value: |c| c.client_entity_write,
    },
    Gauge {
        name: "p4_locks_meta_read",
        help: "meta db read locks",
        value: |c| c.meta_read,
    },
    Gauge {
        name: "p4_locks_meta_write",
        help: "meta db write locks",
        value: |c| c.meta_write,
    },
    Gauge {
        name: "p4_locks_cmds_blocked",
        help: "cmds blocked by locks",
        value: |c| c.blocked_commands,
    },
];

/// Render HELP, TYPE and value lines for every gauge.
pub fn format_metrics(metrics: &RunMetrics) -> Vec<String> {
    let counts = metrics.counts();
    GAUGES
        .iter()
        .flat_map(|g| {
            [
                format!("# HELP {} {}", g.name, g.help),
                format!("# TYPE {} gauge", g.name),
                format!("{} {}", g.name, (g.value)(&counts)),
            ]
        })
        .collect()
}

/// Write the metrics file next to `metrics_root/metrics_file` without
/// publishing it; committing the result replaces the file atomically.
pub fn stage_metrics(
    lines: &[String],
    metrics_root: &Path,
    metrics_file: &str,
) -> Result<StagedWrite> {
    let path = metrics_root.join(metrics_file);
    let mut content = lines.join("\n");
    content.push('\n');

    tracing::debug!(path = %path.display(), "staging metrics file");
    StagedWrite::stage(&path, content.as_bytes())
}
