//! Rendering and persistence of run results.
//!
//! - Metrics: Prometheus text format, replaced atomically each run
//! - Log: timestamped blocking messages, appended

mod log;
mod metrics;

pub use log::{append_log, format_log, timestamp_lines};
pub use metrics::{format_metrics, stage_metrics};
