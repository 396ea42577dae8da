//! Config loading, validation, and override operations.

use super::model::Config;
use crate::error::{MonitorError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+$").expect("version pattern is valid"));

/// Values given on the command line, which take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub metrics_root: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub p4port: Option<String>,
    pub p4user: Option<String>,
}

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            MonitorError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the given config file, or the defaults when there is none.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a YAML string. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| MonitorError::ConfigError(format!("failed to parse YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `metrics_file` must be a bare, non-empty file name
    /// - `server_process` must be non-empty
    /// - `lslocks_legacy_max_version` must look like `MAJOR.MINOR`
    pub fn validate(&self) -> Result<()> {
        if self.metrics_file.is_empty() || self.metrics_file.contains('/') {
            return Err(MonitorError::ConfigError(format!(
                "metrics_file must be a plain file name (found '{}')",
                self.metrics_file
            )));
        }

        if self.server_process.trim().is_empty() {
            return Err(MonitorError::ConfigError(
                "server_process must not be empty".to_string(),
            ));
        }

        if !VERSION_RE.is_match(&self.lslocks_legacy_max_version) {
            return Err(MonitorError::ConfigError(format!(
                "lslocks_legacy_max_version must be MAJOR.MINOR (found '{}')",
                self.lslocks_legacy_max_version
            )));
        }

        Ok(())
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(root) = overrides.metrics_root {
            self.metrics_root = root;
        }
        if let Some(log_file) = overrides.log_file {
            self.log_file = log_file;
        }
        if overrides.p4port.is_some() {
            self.p4port = overrides.p4port;
        }
        if overrides.p4user.is_some() {
            self.p4user = overrides.p4user;
        }
        self
    }

    /// Full path of the published metrics file.
    pub fn metrics_path(&self) -> PathBuf {
        self.metrics_root.join(&self.metrics_file)
    }
}
