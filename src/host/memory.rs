//! Scripted in-memory host.
//!
//! Used by the test suite and by embedders that want to drive the inventory
//! service without touching real hardware. Scan outcomes are queued; once
//! the queue is drained the last configured entries are returned again.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

use super::{HostError, RawScanEntry, WirelessHost};
use crate::permission::AuthorizationState;

/// Handles returned by [`InMemoryHost::pause_next_scan`].
pub struct ScanPause {
    /// Receives once the paused scan has started
    pub started: Receiver<()>,
    /// Send (or drop) to let the paused scan finish
    pub release: Sender<()>,
}

struct PauseGate {
    started: Sender<()>,
    release: Receiver<()>,
}

/// Host whose adapters, scan results and authorization are set up front.
pub struct InMemoryHost {
    adapters: Vec<(String, bool)>,
    entries: Vec<RawScanEntry>,
    queued: Mutex<VecDeque<Result<Vec<RawScanEntry>, String>>>,
    authorization: Mutex<AuthorizationState>,
    grant_on_request: bool,
    scans: AtomicUsize,
    auth_requests: AtomicUsize,
    pause: Mutex<Option<PauseGate>>,
}

impl InMemoryHost {
    /// A host with no adapters, no networks, and authorization granted.
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
            entries: Vec::new(),
            queued: Mutex::new(VecDeque::new()),
            authorization: Mutex::new(AuthorizationState::Granted),
            grant_on_request: false,
            scans: AtomicUsize::new(0),
            auth_requests: AtomicUsize::new(0),
            pause: Mutex::new(None),
        }
    }

    /// Add an adapter; `is_default` marks it as the host default.
    #[must_use]
    pub fn with_adapter(mut self, name: &str, is_default: bool) -> Self {
        self.adapters.push((name.to_string(), is_default));
        self
    }

    /// Entries returned by every scan once the queue is empty.
    #[must_use]
    pub fn with_entries(mut self, entries: Vec<RawScanEntry>) -> Self {
        self.entries = entries;
        self
    }

    /// Queue a one-off successful scan outcome.
    #[must_use]
    pub fn then_scan(self, entries: Vec<RawScanEntry>) -> Self {
        self.lock_queue().push_back(Ok(entries));
        self
    }

    /// Queue a one-off failed scan outcome.
    #[must_use]
    pub fn then_fail(self, message: &str) -> Self {
        self.lock_queue().push_back(Err(message.to_string()));
        self
    }

    /// Initial authorization state.
    #[must_use]
    pub fn with_authorization(self, state: AuthorizationState) -> Self {
        *self.lock_auth() = state;
        self
    }

    /// Flip a pending authorization to granted when it is requested,
    /// as if the user accepted the prompt right away.
    #[must_use]
    pub fn granting_on_request(mut self) -> Self {
        self.grant_on_request = true;
        self
    }

    /// Block the next scan until the returned `release` handle fires.
    pub fn pause_next_scan(&self) -> ScanPause {
        let (started_tx, started_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        *self.pause.lock().unwrap_or_else(|e| e.into_inner()) = Some(PauseGate {
            started: started_tx,
            release: release_rx,
        });
        ScanPause {
            started: started_rx,
            release: release_tx,
        }
    }

    /// Number of scans the host has executed.
    #[must_use]
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    /// Number of authorization requests received.
    #[must_use]
    pub fn authorization_requests(&self) -> usize {
        self.auth_requests.load(Ordering::SeqCst)
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<Vec<RawScanEntry>, String>>> {
        self.queued.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_auth(&self) -> std::sync::MutexGuard<'_, AuthorizationState> {
        self.authorization.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WirelessHost for InMemoryHost {
    fn interfaces(&self) -> Result<Vec<String>, HostError> {
        Ok(self.adapters.iter().map(|(name, _)| name.clone()).collect())
    }

    fn default_interface(&self) -> Result<Option<String>, HostError> {
        Ok(self
            .adapters
            .iter()
            .find(|(_, is_default)| *is_default)
            .map(|(name, _)| name.clone()))
    }

    fn scan(&self, interface: &str) -> Result<Vec<RawScanEntry>, HostError> {
        if !self.adapters.iter().any(|(name, _)| name == interface) {
            return Err(HostError::NoSuchInterface(interface.to_string()));
        }

        let gate = self.pause.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(gate) = gate {
            let _ = gate.started.send(());
            // A dropped sender releases the scan as well
            let _ = gate.release.recv();
        }

        self.scans.fetch_add(1, Ordering::SeqCst);
        match self.lock_queue().pop_front() {
            Some(Ok(entries)) => Ok(entries),
            Some(Err(message)) => Err(HostError::Parse(message)),
            None => Ok(self.entries.clone()),
        }
    }

    fn authorization_status(&self) -> Result<AuthorizationState, HostError> {
        Ok(*self.lock_auth())
    }

    fn request_authorization(&self) -> Result<(), HostError> {
        self.auth_requests.fetch_add(1, Ordering::SeqCst);
        if self.grant_on_request {
            let mut state = self.lock_auth();
            if *state == AuthorizationState::Pending {
                *state = AuthorizationState::Granted;
            }
        }
        Ok(())
    }
}
