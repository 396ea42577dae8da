//! Exit code constants for the p4lockmon CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Snapshot capture failure (lslocks / p4 monitor)
//! - 3: Output write failure (metrics or log file)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input files, or invalid config.
pub const USER_ERROR: i32 = 1;

/// Capture failure: lslocks or `p4 monitor show` could not be run.
pub const CAPTURE_FAILURE: i32 = 2;

/// Write failure: the metrics file or the log file could not be updated.
pub const WRITE_FAILURE: i32 = 3;
