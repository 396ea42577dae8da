//! Summary of blocking chains, oldest blocker first.
//!
//! A blocker's *indirect* count adds the direct victims of every process it
//! blocks that is itself a blocker; *more indirect* goes one level further.
//! Each blocked pid contributes to at most one blocker per level.

use super::builder::{BlockerAggregate, RunMetrics};
use std::collections::{BTreeMap, HashSet};

/// Blocking counts for one blocker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockerSummary {
    pub pid: String,
    pub user: String,
    pub cmd: String,
    pub elapsed: String,
    pub resource: String,
    pub direct: usize,
    pub indirect: usize,
    pub more_indirect: usize,
}

fn indirect_counts(blockers: &BTreeMap<String, BlockerAggregate>) -> BTreeMap<&str, usize> {
    let mut seen = HashSet::new();
    blockers
        .values()
        .map(|b| {
            let count = b
                .blocked_pids
                .iter()
                .filter(|p| seen.insert(p.as_str()))
                .filter_map(|p| blockers.get(p))
                .map(|victim| victim.blocked_pids.len())
                .sum::<usize>();
            (b.pid.as_str(), count)
        })
        .collect()
}

fn more_indirect_counts<'a>(
    blockers: &'a BTreeMap<String, BlockerAggregate>,
    indirect: &BTreeMap<&'a str, usize>,
) -> BTreeMap<&'a str, usize> {
    let mut seen = HashSet::new();
    blockers
        .values()
        .map(|b| {
            if indirect[b.pid.as_str()] == 0 {
                return (b.pid.as_str(), 0);
            }
            let count = b
                .blocked_pids
                .iter()
                .filter(|p| seen.insert(p.as_str()))
                .filter_map(|p| indirect.get(p.as_str()))
                .sum::<usize>();
            (b.pid.as_str(), count)
        })
        .collect()
}

/// Summarize every blocker, sorted oldest first (by elapsed, then pid).
pub fn summarize_blockers(metrics: &RunMetrics) -> Vec<BlockerSummary> {
    let blockers = metrics.blockers();
    let indirect = indirect_counts(blockers);
    let more_indirect = more_indirect_counts(blockers, &indirect);

    let mut summaries: Vec<BlockerSummary> = blockers
        .values()
        .map(|b| BlockerSummary {
            pid: b.pid.clone(),
            user: b.user.clone(),
            cmd: b.cmd.clone(),
            elapsed: b.elapsed.clone(),
            resource: b.resource.clone(),
            direct: b.blocked_pids.len(),
            indirect: indirect[b.pid.as_str()],
            more_indirect: more_indirect[b.pid.as_str()],
        })
        .collect();

    summaries.sort_by(|a, b| b.elapsed.cmp(&a.elapsed).then_with(|| a.pid.cmp(&b.pid)));
    summaries
}

/// Render the blocker report; empty when nothing is blocked.
pub fn format_blocker_report(metrics: &RunMetrics) -> Vec<String> {
    let summaries = summarize_blockers(metrics);
    if summaries.is_empty() {
        return Vec::new();
    }

    let mut lines = vec!["Blocking commands by oldest, with count".to_string()];
    let (mut direct, mut indirect, mut more) = (0, 0, 0);

    for s in &summaries {
        lines.push(format!(
            "blocking cmd: elapsed {}, pid {}, user {}, cmd {}, resource {}, blocking {}, indirectly {}, more indirectly {}",
            s.elapsed, s.pid, s.user, s.cmd, s.resource, s.direct, s.indirect, s.more_indirect
        ));
        direct += s.direct;
        indirect += s.indirect;
        more += s.more_indirect;
    }

    lines.push(format!(
        "blocking totals: blocking {}, indirectly {}, more indirectly {}, total {}",
        direct,
        indirect,
        more,
        direct + indirect + more
    ));
    lines
}
