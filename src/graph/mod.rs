//! Blocking graph reconstruction.
//!
//! lslocks reports, for a waiting lock request, the pid of the process
//! holding the conflicting lock. This module joins those blocker pids with
//! the monitor's process table to build one `BlockerAggregate` per
//! blocking process, alongside the lock counters exported as metrics.
//!
//! All state lives in the [`RunMetrics`] returned by [`build_graph`]; nothing
//! is carried over between runs.

mod builder;
mod report;


pub use builder::{LockCounts, RunMetrics, build_graph};
pub use report::format_blocker_report;
