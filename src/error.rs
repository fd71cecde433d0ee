//! Exit codes and structured error reporting.

use serde::Serialize;

use crate::library::CoverNotFound;
use crate::replicate::UnsyncError;

/// Exit codes for the albumsync binary.
///
/// - 0: Success
/// - 1: General error (unexpected failure)
/// - 2: Not synced (a `check` found no fingerprint match)
/// - 3: Not found (the album to unsync, or a cover image, does not exist)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the command completed.
    Success = 0,
    /// General error: an unexpected error occurred.
    GeneralError = 1,
    /// Not synced: the source has no fingerprint twin in the target.
    NotSynced = 2,
    /// Not found: the album named for removal, or a cover image, is missing.
    NotFound = 3,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "AS000",
            Self::GeneralError => "AS001",
            Self::NotSynced => "AS002",
            Self::NotFound => "AS003",
        }
    }

    /// Pick the exit code for a failed command.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<CoverNotFound>().is_some() {
            return Self::NotFound;
        }
        match err.downcast_ref::<UnsyncError>() {
            Some(UnsyncError::NotFound { .. }) => Self::NotFound,
            _ => Self::GeneralError,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "AS001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{:#}", err),
        }
    }
}
