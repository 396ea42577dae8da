//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for p4lockmon.
///
/// Every key is optional. Unknown keys in the YAML are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Output settings
    // =========================================================================
    /// Directory the metrics file is published in (scraped by node_exporter).
    pub metrics_root: PathBuf,

    /// Name of the metrics file inside `metrics_root`.
    pub metrics_file: String,

    /// Log file that blocking messages are appended to.
    pub log_file: PathBuf,

    // =========================================================================
    // Snapshot settings
    // =========================================================================
    /// Locks are only considered when their command contains this name.
    pub server_process: String,

    /// Path of the p4 client binary (falls back to `$P4BIN`, then `p4`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p4bin: Option<String>,

    /// Server port for `p4 monitor show` (falls back to `$P4PORT`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p4port: Option<String>,

    /// User for `p4 monitor show` (falls back to `$P4USER`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p4user: Option<String>,

    /// Try lslocks through sudo first (needed to see other users' locks).
    pub use_sudo: bool,

    /// Newest lslocks release (`MAJOR.MINOR`) without JSON output.
    pub lslocks_legacy_max_version: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metrics_root: PathBuf::from(DEFAULT_METRICS_ROOT),
            metrics_file: DEFAULT_METRICS_FILE.to_string(),
            log_file: default_log_file(),
            server_process: DEFAULT_SERVER_PROCESS.to_string(),
            p4bin: None,
            p4port: None,
            p4user: None,
            use_sudo: true,
            lslocks_legacy_max_version: DEFAULT_LSLOCKS_LEGACY_MAX_VERSION.to_string(),
        }
    }
}

pub const DEFAULT_METRICS_ROOT: &str = "/p4/metrics";
pub const DEFAULT_METRICS_FILE: &str = "locks.prom";
pub const DEFAULT_LOG_DIR: &str = "/p4/1/logs";
pub const DEFAULT_LOG_NAME: &str = "monitor_metrics.log";
pub const DEFAULT_SERVER_PROCESS: &str = "p4d";
pub const DEFAULT_LSLOCKS_LEGACY_MAX_VERSION: &str = "2.26";

/// `$LOGS/monitor_metrics.log`, with `LOGS` defaulting to the SDP log dir.
fn default_log_file() -> PathBuf {
    let dir = std::env::var("LOGS").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    PathBuf::from(dir).join(DEFAULT_LOG_NAME)
}
