//! Snapshot format detection and normalization into lock records.

use super::legacy::parse_legacy_table;
use super::types::{LockListing, LockRecord};
use crate::error::{MonitorError, Result};

/// The shape of a raw lock snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// `lslocks -J` output.
    Json,
    /// Fixed-column text table from older lslocks.
    LegacyTable,
    /// Nothing but whitespace.
    Empty,
}

impl SnapshotFormat {
    pub fn detect(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() {
            SnapshotFormat::Empty
        } else if trimmed.starts_with('{') {
            SnapshotFormat::Json
        } else {
            SnapshotFormat::LegacyTable
        }
    }
}

/// Render a legacy lslocks table as the JSON document `lslocks -J` would emit.
pub fn legacy_to_json(table: &str) -> Result<String> {
    serde_json::to_string(&parse_legacy_table(table)).map_err(|e| {
        MonitorError::SnapshotError(format!("failed to render lock table as JSON: {}", e))
    })
}

/// Parse a JSON lock listing. A document without a `locks` key is empty.
pub fn parse_listing_json(json: &str) -> Result<LockListing> {
    serde_json::from_str(json).map_err(|e| MonitorError::SnapshotError(e.to_string()))
}

/// Parse a raw snapshot of either format into a lock listing.
pub fn parse_listing(raw: &str) -> Result<LockListing> {
    match SnapshotFormat::detect(raw) {
        SnapshotFormat::Empty => Ok(LockListing::default()),
        SnapshotFormat::Json => parse_listing_json(raw),
        SnapshotFormat::LegacyTable => parse_listing_json(&legacy_to_json(raw)?),
    }
}

/// Normalize a raw snapshot into the lock records of interest.
///
/// Only locks whose command contains `server_process` and that carry a
/// non-empty path are kept; snapshot order is preserved.
pub fn normalize(raw: &str, server_process: &str) -> Result<Vec<LockRecord>> {
    let listing = parse_listing(raw)?;

    Ok(listing
        .locks
        .into_iter()
        .filter(|lock| lock.command.contains(server_process) && !lock.path.is_empty())
        .map(LockRecord::from)
        .collect())
}
