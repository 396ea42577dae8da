//! Error types for p4lockmon.
//!
//! Uses thiserror for derive macros. Only capture and write failures are
//! fatal for a run; snapshot parse errors are degraded by the caller.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for p4lockmon operations.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// User provided invalid arguments or an unreadable input file.
    #[error("{0}")]
    UserError(String),

    /// Configuration file could not be read, parsed, or validated.
    #[error("config error: {0}")]
    ConfigError(String),

    /// A lock snapshot could not be parsed.
    #[error("malformed lock snapshot: {0}")]
    SnapshotError(String),

    /// An external snapshot command failed.
    #[error("snapshot capture failed: {0}")]
    CaptureError(String),

    /// The metrics file or log file could not be written.
    #[error("write failed: {0}")]
    WriteError(String),
}

impl MonitorError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            MonitorError::UserError(_) => exit_codes::USER_ERROR,
            MonitorError::ConfigError(_) => exit_codes::USER_ERROR,
            MonitorError::SnapshotError(_) => exit_codes::USER_ERROR,
            MonitorError::CaptureError(_) => exit_codes::CAPTURE_FAILURE,
            MonitorError::WriteError(_) => exit_codes::WRITE_FAILURE,
        }
    }
}

/// Result type alias for p4lockmon operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_error_has_correct_exit_code() {
        let err = MonitorError::CaptureError("lslocks not found".to_string());
        assert_eq!(err.exit_code(), exit_codes::CAPTURE_FAILURE);
    }

    #[test]
    fn write_error_has_correct_exit_code() {
        let err = MonitorError::WriteError("permission denied".to_string());
        assert_eq!(err.exit_code(), exit_codes::WRITE_FAILURE);
    }

    #[test]
    fn config_and_snapshot_errors_are_user_errors() {
        assert_eq!(
            MonitorError::ConfigError("bad".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
        assert_eq!(
            MonitorError::SnapshotError("bad".to_string()).exit_code(),
            exit_codes::USER_ERROR
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = MonitorError::SnapshotError("expected value at line 1".to_string());
        assert_eq!(
            err.to_string(),
            "malformed lock snapshot: expected value at line 1"
        );

        let err = MonitorError::WriteError("no such directory".to_string());
        assert_eq!(err.to_string(), "write failed: no such directory");
    }
}
