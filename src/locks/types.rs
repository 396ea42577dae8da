//! Lock listing schema and normalized lock records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The structured lock listing, as emitted by `lslocks -J`.
///
/// Legacy text tables are rendered into this same shape before any lock
/// record is built, so there is a single downstream code path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockListing {
    #[serde(default)]
    pub locks: Vec<RawLock>,
}

/// One lock entry of a [`LockListing`].
///
/// `lslocks -J` emits numbers for pid/start/end, booleans for `m` and `null`
/// sizes; every column is read leniently into a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLock {
    #[serde(default, deserialize_with = "lenient_string")]
    pub command: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pid: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub lock_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub size: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub mode: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub m: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub start: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub end: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub path: String,
    #[serde(default, deserialize_with = "lenient_pid")]
    pub blocker: Option<String>,
}

/// Lock mode as reported by lslocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockMode {
    Read,
    Write,
    Other(String),
}

impl LockMode {
    /// Parse an lslocks mode column.
    ///
    /// lslocks marks a lock that is waiting to be granted with a trailing
    /// `*` (`READ*`); it still counts as that mode.
    pub fn parse(mode: &str) -> Self {
        match mode.trim_end_matches('*') {
            "READ" => LockMode::Read,
            "WRITE" => LockMode::Write,
            _ => LockMode::Other(mode.to_string()),
        }
    }
}

/// A normalized lock held (or requested) by a server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockRecord {
    pub command: String,
    pub pid: String,
    pub mode: LockMode,
    pub path: String,
    /// Pid of the process blocking this lock request, if any.
    pub blocker_pid: Option<String>,
}

impl From<RawLock> for LockRecord {
    fn from(raw: RawLock) -> Self {
        Self {
            mode: LockMode::parse(&raw.mode),
            command: raw.command,
            pid: raw.pid,
            path: raw.path,
            blocker_pid: raw.blocker,
        }
    }
}

fn value_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_string(Value::deserialize(deserializer)?))
}

fn lenient_pid<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let pid = value_to_string(Value::deserialize(deserializer)?);
    Ok(if pid.is_empty() { None } else { Some(pid) })
}
