//! Lock snapshot normalization.
//!
//! Accepts either the structured JSON listing produced by `lslocks -J` or the
//! legacy fixed-column table produced by older lslocks releases, and yields a
//! single ordered sequence of [`LockRecord`]s.
//!
//! # Pipeline
//!
//! 1. Detect the snapshot format (`SnapshotFormat`)
//! 2. Legacy tables are tokenized and rendered to the JSON schema first
//! 3. The JSON listing is parsed leniently (numbers, booleans and nulls are
//!    all read as strings)
//! 4. Locks not held by the server process, or without a path, are dropped

mod legacy;
mod normalize;
mod types;


// Re-export public API
pub use normalize::{legacy_to_json, normalize};
pub use types::{LockMode, LockRecord};
