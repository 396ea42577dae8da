//! p4lockmon: Perforce lock contention monitor.
//!
//! Turns an lslocks snapshot and a `p4 monitor show` snapshot into
//! Prometheus lock gauges and a log of which commands block which. This is
//! the main entry point; it parses arguments, dispatches to the command
//! handler, and maps errors to exit codes.

mod capture;
mod classify;
mod cli;
mod commands;
mod config;
mod error;
mod exit_codes;
mod fs;
mod graph;
mod locks;
mod logging;
mod output;
mod processes;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbosity);

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
