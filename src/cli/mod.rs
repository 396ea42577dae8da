//! CLI argument parsing for p4lockmon.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// p4lockmon: Perforce lock contention monitor.
///
/// Correlates OS file locks (lslocks) with server processes (p4 monitor
/// show), publishes lock gauges for Prometheus and logs who blocks whom.
#[derive(Parser, Debug)]
#[command(name = "p4lockmon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory the metrics file is written to.
    #[arg(short, long, global = true)]
    pub metrics_root: Option<PathBuf>,

    /// Log file blocking messages are appended to.
    #[arg(short = 'L', long = "log", global = true)]
    pub log_file: Option<PathBuf>,

    /// Diagnostic verbosity (error, warn, info, debug, trace).
    #[arg(short, long, global = true, default_value = "info")]
    pub verbosity: tracing::Level,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for p4lockmon.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture lock and process snapshots, then publish metrics and log.
    Collect(CollectArgs),

    /// Process previously captured snapshot files.
    Analyze(AnalyzeArgs),

    /// Print the JSON form of a legacy lslocks table.
    Convert(ConvertArgs),
}

/// Arguments for the `collect` command.
#[derive(Parser, Debug)]
pub struct CollectArgs {
    /// Perforce server port. Default: $P4PORT
    #[arg(short, long)]
    pub p4port: Option<String>,

    /// Perforce user. Default: $P4USER
    #[arg(short = 'u', long)]
    pub p4user: Option<String>,
}

/// Arguments for the `analyze` command.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// lslocks output (JSON or legacy table).
    #[arg(long)]
    pub locks: PathBuf,

    /// `p4 monitor show -al` output.
    #[arg(long)]
    pub monitor: PathBuf,

    /// Print metrics and log lines instead of writing them.
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for the `convert` command.
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Legacy lslocks table.
    #[arg(long)]
    pub locks: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_collect_defaults() {
        let cli = Cli::try_parse_from(["p4lockmon", "collect"]).unwrap();
        assert_eq!(cli.verbosity, tracing::Level::INFO);
        assert!(cli.config.is_none());
        if let Command::Collect(args) = cli.command {
            assert!(args.p4port.is_none());
            assert!(args.p4user.is_none());
        } else {
            panic!("Expected Collect command");
        }
    }

    #[test]
    fn parse_collect_with_connection() {
        let cli = Cli::try_parse_from([
            "p4lockmon", "collect", "-p", "ssl:1666", "-u", "perforce", "-v", "debug",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, tracing::Level::DEBUG);
        if let Command::Collect(args) = cli.command {
            assert_eq!(args.p4port.as_deref(), Some("ssl:1666"));
            assert_eq!(args.p4user.as_deref(), Some("perforce"));
        } else {
            panic!("Expected Collect command");
        }
    }

    #[test]
    fn parse_analyze() {
        let cli = Cli::try_parse_from([
            "p4lockmon",
            "--metrics-root",
            "/tmp/metrics",
            "analyze",
            "--locks",
            "locks.json",
            "--monitor",
            "monitor.txt",
            "--stdout",
        ])
        .unwrap();
        assert_eq!(cli.metrics_root, Some(PathBuf::from("/tmp/metrics")));
        if let Command::Analyze(args) = cli.command {
            assert_eq!(args.locks, PathBuf::from("locks.json"));
            assert_eq!(args.monitor, PathBuf::from("monitor.txt"));
            assert!(args.stdout);
        } else {
            panic!("Expected Analyze command");
        }
    }

    #[test]
    fn analyze_requires_both_snapshots() {
        assert!(Cli::try_parse_from(["p4lockmon", "analyze", "--locks", "locks.json"]).is_err());
    }

    #[test]
    fn parse_convert_with_global_log_after_subcommand() {
        let cli = Cli::try_parse_from([
            "p4lockmon", "convert", "--locks", "table.txt", "-L", "/tmp/x.log",
        ])
        .unwrap();
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/x.log")));
        assert!(matches!(cli.command, Command::Convert(_)));
    }

    #[test]
    fn invalid_verbosity_is_rejected() {
        assert!(Cli::try_parse_from(["p4lockmon", "-v", "loud", "collect"]).is_err());
    }
}
