//! Snapshot fixtures shared by unit tests.

/// `lslocks -J` output with one non-server lock and three server read locks
/// (clientEntity, meta, db.have), none blocked.
pub(crate) const JSON_LOCKS: &str = r#"{ "locks": [
    {"command": "lvmetad", "pid": "1458", "type": "POSIX", "size": "5B", "mode": "WRITE", "m": "0", "start": "0", "end": "0", "path": "/run/lvmetad.pid", "blocker": null},
    {"command": "p4d", "pid": "2502", "type": "FLOCK", "size": "17B", "mode": "READ", "m": "0", "start": "0", "end": "0", "path": "/p4/1/root/server.locks/clientEntity/10,d/robomerge-main-ts", "blocker": null},
    {"command": "p4d", "pid": "2502", "type": "FLOCK", "size": "17B", "mode": "READ", "m": "0", "start": "0", "end": "0", "path": "/p4/1/root/server.locks/meta/db", "blocker": null},
    {"command": "p4d", "pid": "2502", "type": "FLOCK", "size": "17B", "mode": "READ", "m": "0", "start": "0", "end": "0", "path": "/p4/1/root/db.have", "blocker": null}
]}"#;

/// Legacy lslocks table covering a row without PATH, a row with PATH and
/// BLOCKER, and two near-identical paths.
pub(crate) const LEGACY_LOCKS: &str = "\
COMMAND           PID   TYPE SIZE MODE  M START END PATH                       BLOCKER
(unknown)          -1 OFDLCK   0B WRITE 0     0   0 /etc/hosts
(unknown)          -1 OFDLCK   0B READ  0     0   0
p4d               107  FLOCK  16K READ* 0     0   0 /path/db.config            105
p4d               105  FLOCK  16K WRITE 0     0   0 /path/db.config
p4d               105  FLOCK  16K WRITE 0     0   0 /path/db.configh
";

/// `p4 monitor show -al` output in the `-F "%id% %runstate% %user% %elapsed% %function% %args%"` form.
pub(crate) const MONITOR: &str = "     562 I perforce 00:01:01 monitor
      2502 I fred 00:01:01 sync //...";

/// Build a single JSON lock entry held by `p4d`.
pub(crate) fn p4d_lock(pid: &str, mode: &str, path: &str, blocker: Option<&str>) -> String {
    let blocker = match blocker {
        Some(b) => format!("\"{}\"", b),
        None => "null".to_string(),
    };
    format!(
        r#"{{"command": "p4d", "pid": "{}", "type": "FLOCK", "size": "17B", "mode": "{}", "m": "0", "start": "0", "end": "0", "path": "{}", "blocker": {}}}"#,
        pid, mode, path, blocker
    )
}

/// Wrap lock entries in a `{"locks": [...]}` document.
pub(crate) fn lock_listing(entries: &[String]) -> String {
    format!("{{\"locks\": [{}]}}", entries.join(",\n"))
}
