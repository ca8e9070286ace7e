//! Scan execution and the scan error taxonomy.
//!
//! The [`ScanExecutor`] runs exactly one host scan per call and hands back
//! the raw entries untouched. Interpretation happens later, in
//! [`crate::records::normalize`] and [`crate::view`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lesscrowd::host::{InMemoryHost, RawScanEntry};
//! use lesscrowd::registry::WirelessAdapter;
//! use lesscrowd::scanner::{ScanError, ScanExecutor};
//!
//! let host = InMemoryHost::new()
//!     .with_adapter("wlan0", true)
//!     .with_entries(vec![RawScanEntry::new(Some("Cafe"), None, -52, Some(6))]);
//! let executor = ScanExecutor::new(Arc::new(host));
//!
//! assert!(matches!(executor.scan(None), Err(ScanError::NoAdapterSelected)));
//!
//! let adapter = WirelessAdapter::new("wlan0", true);
//! assert_eq!(executor.scan(Some(&adapter)).unwrap().len(), 1);
//! ```

pub mod executor;

pub use crate::host::RawScanEntry;
pub use executor::ScanExecutor;

/// Everything that can stop a scan from producing records.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// No adapter is selected; the caller must pick one first.
    #[error("No wireless adapter selected")]
    NoAdapterSelected,

    /// The requested adapter does not exist on this host.
    #[error("Unknown wireless adapter: {name}{}", did_you_mean(.suggestion))]
    UnknownAdapter {
        /// Name that was asked for
        name: String,
        /// Closest existing adapter name
        suggestion: Option<String>,
    },

    /// The host refused or failed the scan. The message is the host's own.
    #[error("Scan failed: {0}")]
    HostScanFailure(String),

    /// Location authorization has not been decided yet.
    #[error("Location authorization is pending; approve the prompt and scan again")]
    AuthorizationPending,

    /// Location authorization was refused.
    #[error("Location authorization was denied; network names cannot be read")]
    AuthorizationDenied,

    /// Another scan is still running on this executor.
    #[error("A scan is already in progress")]
    ScanInProgress,
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

impl ScanError {
    /// Stable machine-readable kind, used in structured output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoAdapterSelected => "NoAdapterSelected",
            Self::UnknownAdapter { .. } => "UnknownAdapter",
            Self::HostScanFailure(_) => "HostScanFailure",
            Self::AuthorizationPending => "AuthorizationPending",
            Self::AuthorizationDenied => "AuthorizationDenied",
            Self::ScanInProgress => "ScanInProgress",
        }
    }
}
