//! Inventory service facade.
//!
//! Wires the adapter registry, permission gate, scan executor, normalizer and
//! projector together, and keeps the most recent successful [`ScanResult`]
//! so views can be recomputed without scanning again.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lesscrowd::host::{InMemoryHost, RawScanEntry};
//! use lesscrowd::service::InventoryService;
//! use lesscrowd::view::{BandFilter, SortDirection, SortKey, ViewQuery};
//!
//! let host = InMemoryHost::new()
//!     .with_adapter("en0", true)
//!     .with_entries(vec![
//!         RawScanEntry::new(Some("Cafe5G"), None, -48, Some(149)),
//!         RawScanEntry::new(Some("Cafe2.4"), None, -61, Some(6)),
//!     ]);
//! let service = InventoryService::new(Arc::new(host));
//!
//! service.refresh_adapters();
//! service.scan().unwrap();
//!
//! let query = ViewQuery::new(BandFilter::Ghz5, SortKey::Signal, SortDirection::Descending);
//! let view = service.view(&query);
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].ssid.to_string(), "Cafe5G");
//! ```

use std::sync::{Arc, Mutex, RwLock, TryLockError};

use crate::host::WirelessHost;
use crate::permission::{AuthorizationState, PermissionGate};
use crate::records::{normalize_all, ScanRecord, ScanResult};
use crate::registry::{AdapterRegistry, WirelessAdapter};
use crate::scanner::{ScanError, ScanExecutor};
use crate::view::{project, ViewQuery};

/// Facade over the whole adapter → gate → scan → normalize → view flow.
pub struct InventoryService {
    registry: AdapterRegistry,
    gate: PermissionGate,
    executor: ScanExecutor,
    latest: RwLock<Option<Arc<ScanResult>>>,
    /// Held from the authorization check until the result is cached.
    in_flight: Mutex<()>,
}

impl InventoryService {
    /// Create a service over `host`. No host calls are made yet.
    #[must_use]
    pub fn new(host: Arc<dyn WirelessHost>) -> Self {
        Self {
            registry: AdapterRegistry::new(Arc::clone(&host)),
            gate: PermissionGate::new(Arc::clone(&host)),
            executor: ScanExecutor::new(host),
            latest: RwLock::new(None),
            in_flight: Mutex::new(()),
        }
    }

    /// Re-enumerate adapters and preselect the default if nothing is selected.
    pub fn refresh_adapters(&self) -> Vec<WirelessAdapter> {
        let adapters = self.registry.list_adapters();
        if self.registry.selected().is_none() {
            self.registry.select_default();
        }
        adapters
    }

    /// All adapters currently on the host.
    pub fn list_adapters(&self) -> Vec<WirelessAdapter> {
        self.registry.list_adapters()
    }

    /// The host default adapter, if any.
    pub fn default_adapter(&self) -> Option<WirelessAdapter> {
        self.registry.default_adapter()
    }

    /// Select the adapter named `name` for subsequent scans.
    ///
    /// # Errors
    ///
    /// `UnknownAdapter` when no adapter has that name.
    pub fn select_adapter(&self, name: &str) -> Result<WirelessAdapter, ScanError> {
        self.registry.select(name)
    }

    /// The adapter scans will run on.
    #[must_use]
    pub fn selected_adapter(&self) -> Option<WirelessAdapter> {
        self.registry.selected()
    }

    /// Check location authorization, prompting once if undetermined.
    pub fn ensure_authorized(&self) -> AuthorizationState {
        self.gate.ensure_authorized()
    }

    /// Scan on the selected adapter and cache the result.
    ///
    /// On failure the previously cached result is left untouched.
    ///
    /// # Errors
    ///
    /// Any [`ScanError`]: nothing selected, authorization not granted, a scan
    /// already running, or the host failing the scan.
    pub fn scan(&self) -> Result<Arc<ScanResult>, ScanError> {
        let outcome = self.scan_selected();
        if let Err(e) = &outcome {
            log::debug!("Scan failed: {}", e);
        }
        outcome
    }

    /// Select `adapter_name` and scan on it.
    ///
    /// # Errors
    ///
    /// `UnknownAdapter`, or anything [`Self::scan`] returns.
    pub fn scan_adapter(&self, adapter_name: &str) -> Result<Arc<ScanResult>, ScanError> {
        self.select_adapter(adapter_name)?;
        self.scan()
    }

    /// Most recent successful scan, if any.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<ScanResult>> {
        self.latest.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Project the cached records through `query`.
    ///
    /// Empty until a scan has succeeded.
    #[must_use]
    pub fn view(&self, query: &ViewQuery) -> Vec<ScanRecord> {
        self.latest()
            .map(|result| project(result.records(), query))
            .unwrap_or_default()
    }

    fn scan_selected(&self) -> Result<Arc<ScanResult>, ScanError> {
        let adapter = self.registry.selected().ok_or(ScanError::NoAdapterSelected)?;

        let _guard = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return Err(ScanError::ScanInProgress),
        };

        self.gate.ensure_authorized().into_result()?;

        let raw = self.executor.scan(Some(&adapter))?;
        let result = Arc::new(ScanResult::new(adapter.name(), normalize_all(raw)));

        *self.latest.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::clone(&result));
        Ok(result)
    }
}
