//! Location/privacy authorization gate.
//!
//! Some hosts only reveal SSIDs to processes the user has authorized for
//! location access. The gate checks that state before a scan and, when the
//! user has never been asked, fires the host prompt once and returns
//! immediately. It never waits for the user's answer; callers retry later.

use std::fmt;
use std::sync::Arc;

use crate::host::WirelessHost;
use crate::scanner::ScanError;

/// Authorization as reported by the host privacy subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationState {
    /// Scans may return real SSIDs
    Granted,
    /// The user or a policy refused
    Denied,
    /// Never determined, or a prompt is outstanding
    Pending,
}

impl AuthorizationState {
    /// Turn the state into a scan precondition.
    ///
    /// # Errors
    ///
    /// `AuthorizationPending` or `AuthorizationDenied` unless granted.
    pub fn into_result(self) -> Result<(), ScanError> {
        match self {
            Self::Granted => Ok(()),
            Self::Denied => Err(ScanError::AuthorizationDenied),
            Self::Pending => Err(ScanError::AuthorizationPending),
        }
    }
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// Stateless check-and-request step in front of the scan executor.
#[derive(Clone)]
pub struct PermissionGate {
    host: Arc<dyn WirelessHost>,
}

impl PermissionGate {
    /// Create a gate for `host`.
    #[must_use]
    pub fn new(host: Arc<dyn WirelessHost>) -> Self {
        Self { host }
    }

    /// Report the current authorization, prompting once if undetermined.
    ///
    /// A host that cannot report its status is treated as pending so the
    /// caller retries instead of scanning blind.
    pub fn ensure_authorized(&self) -> AuthorizationState {
        let state = match self.host.authorization_status() {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Could not query location authorization: {}", e);
                return AuthorizationState::Pending;
            }
        };

        if state == AuthorizationState::Pending {
            log::info!("Location authorization not determined; requesting it from the host");
            if let Err(e) = self.host.request_authorization() {
                log::warn!("Authorization request failed: {}", e);
            }
        }

        log::debug!("Location authorization: {}", state);
        state
    }
}
