//! Adapter registry.
//!
//! Enumerates the host's wireless interfaces and remembers which one is
//! selected for scanning. Every enumeration produces a fresh immutable
//! snapshot that replaces the previous one wholesale.

use std::sync::{Arc, RwLock};

use crate::host::WirelessHost;
use crate::scanner::ScanError;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// A wireless interface present on the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WirelessAdapter {
    name: String,
    is_default: bool,
}

impl WirelessAdapter {
    /// Create an adapter record.
    #[must_use]
    pub fn new(name: impl Into<String>, is_default: bool) -> Self {
        Self {
            name: name.into(),
            is_default,
        }
    }

    /// Interface name, unique per host.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the host reports this as its default interface.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

/// Registry of host adapters and the current selection.
pub struct AdapterRegistry {
    host: Arc<dyn WirelessHost>,
    snapshot: RwLock<Arc<[WirelessAdapter]>>,
    selected: RwLock<Option<WirelessAdapter>>,
}

impl AdapterRegistry {
    /// Create a registry with an empty snapshot and nothing selected.
    #[must_use]
    pub fn new(host: Arc<dyn WirelessHost>) -> Self {
        Self {
            host,
            snapshot: RwLock::new(Arc::from(Vec::new())),
            selected: RwLock::new(None),
        }
    }

    /// Query the host and replace the snapshot.
    ///
    /// Host failures are logged and yield an empty list; this never errors.
    /// If the selected adapter disappeared, the selection is cleared.
    pub fn list_adapters(&self) -> Vec<WirelessAdapter> {
        let adapters = self.enumerate();

        *self.snapshot.write().unwrap_or_else(|e| e.into_inner()) = Arc::from(adapters.clone());

        let mut selected = self.selected.write().unwrap_or_else(|e| e.into_inner());
        if let Some(current) = selected.as_ref() {
            match adapters.iter().find(|a| a.name == current.name) {
                Some(fresh) => *selected = Some(fresh.clone()),
                None => {
                    log::info!("Selected adapter {} is gone", current.name);
                    *selected = None;
                }
            }
        }

        adapters
    }

    /// The host default adapter, queried afresh.
    pub fn default_adapter(&self) -> Option<WirelessAdapter> {
        self.list_adapters().into_iter().find(WirelessAdapter::is_default)
    }

    /// Adapters from the most recent enumeration.
    #[must_use]
    pub fn snapshot(&self) -> Arc<[WirelessAdapter]> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Select an adapter by name from the current snapshot.
    ///
    /// The snapshot is refreshed first if it is empty.
    ///
    /// # Errors
    ///
    /// `UnknownAdapter` when no adapter has that name.
    pub fn select(&self, name: &str) -> Result<WirelessAdapter, ScanError> {
        let mut adapters = self.snapshot();
        if adapters.is_empty() {
            self.list_adapters();
            adapters = self.snapshot();
        }

        let adapter = adapters
            .iter()
            .find(|a| a.name == name)
            .cloned()
            .ok_or_else(|| ScanError::UnknownAdapter {
                name: name.to_string(),
                suggestion: suggest(name, adapters.iter().map(WirelessAdapter::name)),
            })?;

        log::debug!("Selected adapter {}", adapter.name);
        *self.selected.write().unwrap_or_else(|e| e.into_inner()) = Some(adapter.clone());
        Ok(adapter)
    }

    /// Select the default adapter from the current snapshot, if there is one.
    pub fn select_default(&self) -> Option<WirelessAdapter> {
        let adapter = self.snapshot().iter().find(|a| a.is_default).cloned();
        if let Some(adapter) = &adapter {
            log::debug!("Selected default adapter {}", adapter.name);
            *self.selected.write().unwrap_or_else(|e| e.into_inner()) = Some(adapter.clone());
        }
        adapter
    }

    /// The currently selected adapter.
    #[must_use]
    pub fn selected(&self) -> Option<WirelessAdapter> {
        self.selected.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn enumerate(&self) -> Vec<WirelessAdapter> {
        let names = match self.host.interfaces() {
            Ok(names) => names,
            Err(e) => {
                log::warn!("Could not enumerate wireless adapters: {}", e);
                return Vec::new();
            }
        };

        let default = match self.host.default_interface() {
            Ok(default) => default,
            Err(e) => {
                log::warn!("Could not determine default adapter: {}", e);
                None
            }
        };

        let adapters: Vec<WirelessAdapter> = names
            .into_iter()
            .map(|name| {
                let is_default = default.as_deref() == Some(name.as_str());
                WirelessAdapter { name, is_default }
            })
            .collect();

        log::debug!(
            "Found {} wireless adapter(s), default: {}",
            adapters.len(),
            default.as_deref().unwrap_or("none")
        );
        adapters
    }
}

/// Closest candidate to `name`, if any is similar enough.
pub(crate) fn suggest<'a>(name: &str, candidates: impl Iterator<Item = &'a str>) -> Option<String> {
    candidates
        .map(|candidate| (candidate, strsim::jaro_winkler(name, candidate)))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate.to_string())
}
