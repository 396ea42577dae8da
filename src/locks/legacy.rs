//! Parser for the legacy lslocks text table.
//!
//! Old util-linux releases cannot emit JSON, so the fixed-column table is
//! tokenized here and rendered into a [`LockListing`]:
//!
//! ```text
//! COMMAND           PID   TYPE SIZE MODE  M START END PATH                       BLOCKER
//! (unknown)          -1 OFDLCK   0B WRITE 0     0   0 /etc/hosts
//! p4d               107  FLOCK  16K READ* 0     0   0 /path/db.config            105
//! ```
//!
//! PATH and BLOCKER are optional trailing columns. When the last trailing
//! token is purely numeric it is the blocker pid and the tokens between it
//! and the eighth column form the path.

use super::types::{LockListing, RawLock};

/// Number of columns that precede the optional PATH and BLOCKER columns.
const FIXED_COLUMNS: usize = 8;

/// Outcome of tokenizing one line of the legacy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyRow {
    Lock(RawLock),
    Header,
    Blank,
    /// Row with no PATH column (or too few columns); carries the token count.
    Incomplete(usize),
}

/// Tokenize a single line of the legacy table.
pub fn parse_legacy_row(line: &str) -> LegacyRow {
    let spans = token_spans(line);
    let parts: Vec<&str> = spans.iter().map(|&(_, token)| token).collect();

    if parts.is_empty() {
        return LegacyRow::Blank;
    }
    if parts[0] == "COMMAND" {
        return LegacyRow::Header;
    }
    if parts.len() <= FIXED_COLUMNS {
        return LegacyRow::Incomplete(parts.len());
    }

    // The path is sliced from the line so inner whitespace survives.
    let path_start = spans[FIXED_COLUMNS].0;
    let (path_end, blocker) = match spans.last() {
        Some(&(offset, last)) if is_pid(last) => (offset, Some(last.to_string())),
        _ => (line.len(), None),
    };

    LegacyRow::Lock(RawLock {
        command: parts[0].to_string(),
        pid: parts[1].to_string(),
        lock_type: parts[2].to_string(),
        size: parts[3].to_string(),
        mode: parts[4].to_string(),
        m: parts[5].to_string(),
        start: parts[6].to_string(),
        end: parts[7].to_string(),
        path: line[path_start..path_end].trim_end().to_string(),
        blocker,
    })
}

/// Parse a whole legacy table into a lock listing, preserving row order.
pub fn parse_legacy_table(table: &str) -> LockListing {
    let mut listing = LockListing::default();

    for line in table.lines() {
        match parse_legacy_row(line) {
            LegacyRow::Lock(lock) => listing.locks.push(lock),
            LegacyRow::Incomplete(fields) => {
                tracing::warn!(fields, line, "not enough fields in lslocks row, skipping");
            }
            LegacyRow::Header | LegacyRow::Blank => {}
        }
    }

    tracing::debug!(locks = listing.locks.len(), "parsed legacy lslocks table");
    listing
}

/// Whitespace-separated tokens with their byte offsets in `line`.
fn token_spans(line: &str) -> Vec<(usize, &str)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, &line[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, &line[s..]));
    }

    spans
}

fn is_pid(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}
