//! Exit codes and structured error reporting.

use serde::Serialize;

use crate::config::ConfigError;
use crate::scanner::ScanError;

/// Process exit codes.
///
/// - 0: access points listed (or a non-scan command succeeded)
/// - 1: unexpected failure
/// - 2: scan succeeded but the view is empty
/// - 3: location authorization pending or denied
/// - 4: no usable wireless adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Completed normally with output.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// Scan completed but nothing matched the view.
    NoAccessPoints = 2,
    /// The host has not granted location authorization.
    AuthorizationRequired = 3,
    /// No adapter is selected or the requested one does not exist.
    NoAdapter = 4,
}

impl ExitCode {
    /// Numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "LC000",
            Self::GeneralError => "LC001",
            Self::NoAccessPoints => "LC002",
            Self::AuthorizationRequired => "LC003",
            Self::NoAdapter => "LC004",
        }
    }

    /// Exit code for a scan failure.
    #[must_use]
    pub fn from_scan_error(err: &ScanError) -> Self {
        match err {
            ScanError::AuthorizationPending | ScanError::AuthorizationDenied => {
                Self::AuthorizationRequired
            }
            ScanError::NoAdapterSelected | ScanError::UnknownAdapter { .. } => Self::NoAdapter,
            ScanError::HostScanFailure(_) | ScanError::ScanInProgress => Self::GeneralError,
        }
    }

    /// Exit code for any error returned by `run_app`.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        err.downcast_ref::<ScanError>()
            .map_or(Self::GeneralError, Self::from_scan_error)
    }
}

/// Error report printed with `--json-errors`.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// Error code, e.g. "LC003"
    pub code: String,
    /// Process exit code
    pub exit_code: i32,
    /// Short category, e.g. "AuthorizationDenied"
    pub kind: String,
    /// Human-readable message
    pub message: String,
}

impl StructuredError {
    /// Build a report from an error and the exit code chosen for it.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        let kind = if let Some(scan) = err.downcast_ref::<ScanError>() {
            scan.kind()
        } else if err.downcast_ref::<ConfigError>().is_some() {
            "Config"
        } else {
            "General"
        };

        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            kind: kind.to_string(),
            message: format!("{:#}", err),
        }
    }
}
