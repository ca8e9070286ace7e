//! Host wireless subsystem port.
//!
//! Everything platform-specific sits behind the [`WirelessHost`] trait:
//! enumerating interfaces, running one scan, and querying the privacy
//! subsystem that gates SSID visibility.
//!
//! # Implementations
//!
//! - [`LinuxIwHost`]: reads `/sys/class/net` and shells out to `iw dev <iface> scan`
//! - [`CoreWlanHelperHost`]: talks JSON lines to a CoreWLAN helper binary (macOS)
//! - [`InMemoryHost`]: scripted host for tests and embedding
//!
//! # Example
//!
//! ```
//! use lesscrowd::host::{InMemoryHost, RawScanEntry, WirelessHost};
//!
//! let host = InMemoryHost::new()
//!     .with_adapter("wlan0", true)
//!     .with_entries(vec![RawScanEntry::new(Some("Cafe"), None, -52, Some(6))]);
//!
//! assert_eq!(host.interfaces().unwrap(), vec!["wlan0".to_string()]);
//! assert_eq!(host.scan("wlan0").unwrap().len(), 1);
//! ```

pub mod corewlan;
pub mod linux;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::permission::AuthorizationState;

pub use corewlan::CoreWlanHelperHost;
pub use linux::LinuxIwHost;
pub use memory::InMemoryHost;

/// One access point exactly as the host reported it.
///
/// Nothing here is validated; the normalizer decides what counts as real data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawScanEntry {
    /// Network name, absent when hidden or redacted
    pub ssid: Option<String>,
    /// Access point hardware address as text
    pub bssid: Option<String>,
    /// Received signal strength in dBm
    pub rssi_dbm: i32,
    /// 802.11 channel number, absent when the host could not report it
    pub channel: Option<u32>,
}

impl RawScanEntry {
    /// Create a raw entry from borrowed parts.
    #[must_use]
    pub fn new(ssid: Option<&str>, bssid: Option<&str>, rssi_dbm: i32, channel: Option<u32>) -> Self {
        Self {
            ssid: ssid.map(str::to_owned),
            bssid: bssid.map(str::to_owned),
            rssi_dbm,
            channel,
        }
    }
}

/// Errors raised by a host implementation.
#[derive(thiserror::Error, Debug)]
pub enum HostError {
    /// The external program could not be started.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The external program ran but reported failure.
    #[error("`{program}` exited with {status}: {stderr}")]
    Exit {
        /// Program that failed
        program: String,
        /// Exit status as reported by the OS
        status: String,
        /// Trimmed standard error output
        stderr: String,
    },

    /// A sysfs or other host file could not be read.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Host output did not match the expected format.
    #[error("unexpected host output: {0}")]
    Parse(String),

    /// The requested interface does not exist or is not wireless.
    #[error("no such wireless interface: {0}")]
    NoSuchInterface(String),
}

/// Port abstracting the platform wireless subsystem.
///
/// Implementations must be cheap to share across threads; the inventory
/// service holds one behind an `Arc`.
pub trait WirelessHost: Send + Sync {
    /// Names of all wireless interfaces currently present, in host order.
    fn interfaces(&self) -> Result<Vec<String>, HostError>;

    /// Interface the host considers the default, if any.
    fn default_interface(&self) -> Result<Option<String>, HostError>;

    /// Run exactly one scan on `interface` and return entries in host order.
    fn scan(&self, interface: &str) -> Result<Vec<RawScanEntry>, HostError>;

    /// Current location/privacy authorization.
    ///
    /// Hosts without such a gate are always authorized.
    fn authorization_status(&self) -> Result<AuthorizationState, HostError> {
        Ok(AuthorizationState::Granted)
    }

    /// Ask the host to prompt for authorization. Must not wait for the answer.
    fn request_authorization(&self) -> Result<(), HostError> {
        Ok(())
    }
}

/// Build the host implementation for the platform this binary runs on.
#[must_use]
pub fn native_host(config: &Config) -> Arc<dyn WirelessHost> {
    if cfg!(target_os = "macos") {
        log::debug!("Using CoreWLAN helper at {}", config.macos_helper);
        Arc::new(CoreWlanHelperHost::with_path(config.macos_helper.clone()))
    } else if cfg!(target_os = "linux") {
        log::debug!("Using iw backend (scan dump: {})", config.iw_scan_dump);
        Arc::new(LinuxIwHost::new().use_cached(config.iw_scan_dump))
    } else {
        log::warn!("No wireless backend for this platform; no adapters will be listed");
        Arc::new(InMemoryHost::new())
    }
}

/// Run an external program and return its stdout, mapping failures to [`HostError`].
pub(crate) fn run_program(program: &str, args: &[&str]) -> Result<String, HostError> {
    log::debug!("Running {} {}", program, args.join(" "));

    let output = std::process::Command::new(program)
        .args(args)
        .output()
        .map_err(|source| HostError::Spawn {
            program: program.to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(HostError::Exit {
            program: program.to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
