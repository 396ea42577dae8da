//! Command implementations for p4lockmon.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. All commands share the pipeline in [`pipeline`].

mod analyze;
mod collect;
mod convert;
pub mod pipeline;

use crate::cli::{Cli, Command};
use crate::config::{Config, Overrides};
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let mut overrides = Overrides {
        metrics_root: cli.metrics_root,
        log_file: cli.log_file,
        ..Overrides::default()
    };
    if let Command::Collect(args) = &cli.command {
        overrides.p4port = args.p4port.clone();
        overrides.p4user = args.p4user.clone();
    }

    let config = Config::load_or_default(cli.config.as_deref())?.with_overrides(overrides);

    match cli.command {
        Command::Collect(_) => collect::cmd_collect(&config),
        Command::Analyze(args) => analyze::cmd_analyze(&config, args),
        Command::Convert(args) => convert::cmd_convert(args),
    }
}
