//! Parser for `p4 monitor show -al` process snapshots.
//!
//! The monitor is invoked with
//! `-F "%id% %runstate% %user% %elapsed% %function% %args%"`, so each line reads:
//!
//! ```text
//! 562 I perforce 00:01:01 monitor
//! 2502 I fred 00:01:01 sync //...
//! ```
//!
//! Lines that do not have this shape (banners, errors, blank lines) are
//! skipped, never treated as a failure.

use std::collections::HashMap;

/// A server process as reported by the monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub pid: String,
    pub user: String,
    pub cmd: String,
    pub args: String,
    pub elapsed: String,
}

/// Process table keyed by pid.
pub type ProcessTable = HashMap<String, ProcessInfo>;

/// Why a monitor line was not turned into a [`ProcessInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    /// Fewer than the five leading columns.
    TooFewColumns(usize),
    /// First column is not a numeric pid.
    BadPid,
}

/// Split the next whitespace-delimited token off the front of `input`.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some((&input[..end], &input[end..]))
}

/// Parse one monitor line.
///
/// The five leading columns are pid, run state, user, elapsed and command;
/// anything after the command is kept verbatim (minus surrounding
/// whitespace) as the argument string.
pub fn parse_process_line(line: &str) -> std::result::Result<ProcessInfo, SkipReason> {
    let mut columns = [""; 5];
    let mut rest = line;

    for (i, column) in columns.iter_mut().enumerate() {
        match next_token(rest) {
            Some((token, remainder)) => {
                *column = token;
                rest = remainder;
            }
            None if i == 0 => return Err(SkipReason::Blank),
            None => return Err(SkipReason::TooFewColumns(i)),
        }
    }

    let [pid, _runstate, user, elapsed, cmd] = columns;
    if !pid.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SkipReason::BadPid);
    }

    Ok(ProcessInfo {
        pid: pid.to_string(),
        user: user.to_string(),
        cmd: cmd.to_string(),
        args: rest.trim().to_string(),
        elapsed: elapsed.to_string(),
    })
}

/// Parse a whole monitor snapshot into a process table.
///
/// When a pid appears more than once the later line wins.
pub fn parse_processes(snapshot: &str) -> ProcessTable {
    let mut table = ProcessTable::new();

    for line in snapshot.lines() {
        match parse_process_line(line) {
            Ok(info) => {
                table.insert(info.pid.clone(), info);
            }
            Err(SkipReason::Blank) => {}
            Err(reason) => tracing::debug!(?reason, line, "skipping monitor line"),
        }
    }

    table
}
