//! Single-shot scan executor with an overlap guard.

use std::sync::{Arc, Mutex, TryLockError};
use std::time::Instant;

use super::{RawScanEntry, ScanError};
use crate::host::WirelessHost;
use crate::registry::WirelessAdapter;

/// Runs one host scan per call.
///
/// At most one scan is in flight per executor. A call made while another is
/// running is rejected with [`ScanError::ScanInProgress`] rather than queued.
pub struct ScanExecutor {
    host: Arc<dyn WirelessHost>,
    in_flight: Mutex<()>,
}

impl ScanExecutor {
    /// Create an executor for `host`.
    #[must_use]
    pub fn new(host: Arc<dyn WirelessHost>) -> Self {
        Self {
            host,
            in_flight: Mutex::new(()),
        }
    }

    /// Scan on `adapter` and return the host's entries in host order.
    ///
    /// # Errors
    ///
    /// - `NoAdapterSelected` when `adapter` is `None`
    /// - `ScanInProgress` when another scan holds the executor
    /// - `HostScanFailure` with the host's message when the scan itself fails
    pub fn scan(&self, adapter: Option<&WirelessAdapter>) -> Result<Vec<RawScanEntry>, ScanError> {
        let adapter = adapter.ok_or(ScanError::NoAdapterSelected)?;

        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::WouldBlock) => {
                log::warn!("Rejected scan on {}: another scan is running", adapter.name());
                return Err(ScanError::ScanInProgress);
            }
            // A panicking scan leaves nothing to repair; the guard protects no data
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
        };

        log::info!("Scanning on {}", adapter.name());
        let start = Instant::now();

        let entries = self
            .host
            .scan(adapter.name())
            .map_err(|e| ScanError::HostScanFailure(e.to_string()))?;

        log::info!(
            "Scan on {} returned {} entries in {:?}",
            adapter.name(),
            entries.len(),
            start.elapsed()
        );
        for entry in &entries {
            log::trace!("  {:?}", entry);
        }

        Ok(entries)
    }
}
