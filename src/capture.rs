//! Snapshot capture from lslocks and `p4 monitor show`.
//!
//! This is the only module that runs external programs. It returns raw
//! snapshot text; parsing is left to [`crate::locks`] and
//! [`crate::processes`].

use crate::config::Config;
use crate::error::{MonitorError, Result};
use regex::Regex;
use std::process::{Command, Output};
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)").expect("version pattern is valid"));

/// Output format the process monitor is asked for.
pub const MONITOR_FORMAT: &str = "%id% %runstate% %user% %elapsed% %function% %args%";

/// Output of a successful command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a program and capture its output.
///
/// # Returns
///
/// * `Ok(CommandOutput)` - On exit code 0
/// * `Err(MonitorError::CaptureError)` - If the program could not be spawned
///   or exited non-zero
pub fn run_command(program: &str, args: &[String]) -> Result<CommandOutput> {
    tracing::debug!(program, ?args, "running");

    let output = Command::new(program).args(args).output().map_err(|e| {
        MonitorError::CaptureError(format!("failed to execute {}: {}", program, e))
    })?;
    let captured = CommandOutput::from_output(&output);

    if output.status.success() {
        Ok(captured)
    } else {
        Err(MonitorError::CaptureError(format!(
            "{} failed (exit code {}): {}",
            program,
            output.status.code().unwrap_or(-1),
            captured.stderr
        )))
    }
}

/// Extract `(major, minor)` from `lslocks -V` output such as
/// `lslocks from util-linux 2.23.2`.
pub fn parse_lslocks_version(output: &str) -> Option<(u32, u32)> {
    let caps = VERSION_RE.captures(output)?;
    Some((caps[1].parse().ok()?, caps[2].parse().ok()?))
}

/// Whether an lslocks release newer than `legacy_max` (`MAJOR.MINOR`).
/// An unknown version is treated as legacy.
pub fn supports_json(version: Option<(u32, u32)>, legacy_max: &str) -> bool {
    match (version, parse_lslocks_version(legacy_max)) {
        (Some(version), Some(max)) => version > max,
        _ => false,
    }
}

/// Arguments for lslocks, with or without JSON output.
pub fn lslocks_args(json: bool) -> Vec<String> {
    let mut args = vec!["-o".to_string(), "+BLOCKER".to_string()];
    if json {
        args.push("-J".to_string());
    }
    args
}

/// Run lslocks, through sudo first when configured.
fn run_lslocks(args: &[String], use_sudo: bool) -> Result<String> {
    if use_sudo {
        let mut sudo_args = vec!["lslocks".to_string()];
        sudo_args.extend_from_slice(args);
        match run_command("sudo", &sudo_args) {
            Ok(out) if !out.stdout.trim().is_empty() => return Ok(out.stdout),
            Ok(_) => tracing::warn!("sudo lslocks returned nothing, retrying without sudo"),
            Err(e) => tracing::warn!(error = %e, "sudo lslocks failed, retrying without sudo"),
        }
    }
    Ok(run_command("lslocks", args)?.stdout)
}

/// Capture the lock snapshot, in JSON when lslocks supports it.
pub fn capture_locks(config: &Config) -> Result<String> {
    let version = run_command("lslocks", &["-V".to_string()])
        .ok()
        .and_then(|out| parse_lslocks_version(&out.stdout));
    let json = supports_json(version, &config.lslocks_legacy_max_version);
    tracing::debug!(?version, json, "detected lslocks");

    run_lslocks(&lslocks_args(json), config.use_sudo)
}

/// Connection settings for `p4 monitor show`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct P4Target {
    pub p4bin: String,
    pub p4port: Option<String>,
    pub p4user: Option<String>,
}

impl P4Target {
    /// Resolve settings from config, falling back to `P4BIN`/`P4PORT`/`P4USER`
    /// as looked up through `env`.
    pub fn resolve(config: &Config, env: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            p4bin: config
                .p4bin
                .clone()
                .or_else(|| env("P4BIN"))
                .unwrap_or_else(|| "p4".to_string()),
            p4port: config.p4port.clone().or_else(|| env("P4PORT")),
            p4user: config.p4user.clone().or_else(|| env("P4USER")),
        }
    }

    /// Arguments of the monitor command. Unset port or user are left to the
    /// p4 client's own environment.
    pub fn monitor_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(user) = &self.p4user {
            args.extend(["-u".to_string(), user.clone()]);
        }
        if let Some(port) = &self.p4port {
            args.extend(["-p".to_string(), port.clone()]);
        }
        args.extend(
            ["-F", MONITOR_FORMAT, "monitor", "show", "-al"]
                .iter()
                .map(|s| s.to_string()),
        );
        args
    }
}

/// Capture the process snapshot from the server monitor.
pub fn capture_processes(config: &Config) -> Result<String> {
    let target = P4Target::resolve(config, |key| std::env::var(key).ok());
    Ok(run_command(&target.p4bin, &target.monitor_args())?.stdout)
}
