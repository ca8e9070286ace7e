//! macOS host backed by a CoreWLAN helper binary.
//!
//! CoreWLAN and CoreLocation are Objective-C/Swift frameworks without a
//! stable C ABI, so the platform calls live in a small helper executable
//! that prints JSON, one object per line:
//!
//! ```text
//! $ lesscrowd-corewlan interfaces
//! {"name":"en0","default":true}
//! $ lesscrowd-corewlan scan en0
//! {"ssid":"Cafe5G","bssid":"a4:2b:b0:11:22:33","rssi":-48,"channel":149}
//! {"ssid":null,"bssid":null,"rssi":-80,"channel":6}
//! $ lesscrowd-corewlan auth-status
//! {"status":"notDetermined"}
//! $ lesscrowd-corewlan request-auth
//! {"status":"notDetermined"}
//! ```
//!
//! Lines that are not JSON objects are skipped so the helper may print
//! diagnostics on stdout.
//!
//! The helper's source is `helper/lesscrowd-corewlan.swift` in this
//! repository. Build it with:
//!
//! ```text
//! swiftc -O helper/lesscrowd-corewlan.swift \
//!     -framework CoreWLAN -framework CoreLocation -o lesscrowd-corewlan
//! ```

use serde::Deserialize;

use super::{run_program, HostError, RawScanEntry, WirelessHost};
use crate::permission::AuthorizationState;

/// Default helper name looked up on `$PATH`.
pub const DEFAULT_HELPER: &str = "lesscrowd-corewlan";

/// Host implementation that delegates to the CoreWLAN helper.
#[derive(Debug, Clone)]
pub struct CoreWlanHelperHost {
    helper_path: String,
}

impl CoreWlanHelperHost {
    /// Use the helper found on `$PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_path(DEFAULT_HELPER)
    }

    /// Use an explicit helper path.
    #[must_use]
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            helper_path: path.into(),
        }
    }

    /// Path of the helper this host invokes.
    #[must_use]
    pub fn helper_path(&self) -> &str {
        &self.helper_path
    }

    fn interface_lines(&self) -> Result<Vec<HelperInterface>, HostError> {
        let stdout = run_program(&self.helper_path, &["interfaces"])?;
        Ok(json_lines(&stdout))
    }
}

impl Default for CoreWlanHelperHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WirelessHost for CoreWlanHelperHost {
    fn interfaces(&self) -> Result<Vec<String>, HostError> {
        Ok(self
            .interface_lines()?
            .into_iter()
            .map(|iface| iface.name)
            .collect())
    }

    fn default_interface(&self) -> Result<Option<String>, HostError> {
        Ok(self
            .interface_lines()?
            .into_iter()
            .find(|iface| iface.default)
            .map(|iface| iface.name))
    }

    fn scan(&self, interface: &str) -> Result<Vec<RawScanEntry>, HostError> {
        let stdout = run_program(&self.helper_path, &["scan", interface])?;
        Ok(parse_helper_scan_output(&stdout))
    }

    fn authorization_status(&self) -> Result<AuthorizationState, HostError> {
        let stdout = run_program(&self.helper_path, &["auth-status"])?;
        let status: HelperAuthStatus = json_lines(&stdout)
            .into_iter()
            .next()
            .ok_or_else(|| HostError::Parse("auth-status printed no status line".to_string()))?;
        Ok(parse_authorization_status(&status.status))
    }

    fn request_authorization(&self) -> Result<(), HostError> {
        run_program(&self.helper_path, &["request-auth"]).map(|_| ())
    }
}

#[derive(Debug, Deserialize)]
struct HelperInterface {
    name: String,
    #[serde(default)]
    default: bool,
}

#[derive(Debug, Deserialize)]
struct HelperNetwork {
    ssid: Option<String>,
    bssid: Option<String>,
    rssi: i32,
    channel: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct HelperAuthStatus {
    status: String,
}

fn json_lines<T: serde::de::DeserializeOwned>(output: &str) -> Vec<T> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .filter_map(|line| match serde_json::from_str(line) {
            Ok(value) => Some(value),
            Err(e) => {
                log::debug!("Skipping malformed helper line {:?}: {}", line, e);
                None
            }
        })
        .collect()
}

/// Parse the JSON-lines output of `lesscrowd-corewlan scan <iface>`.
#[must_use]
pub fn parse_helper_scan_output(output: &str) -> Vec<RawScanEntry> {
    json_lines::<HelperNetwork>(output)
        .into_iter()
        .map(|net| RawScanEntry {
            ssid: net.ssid,
            bssid: net.bssid,
            rssi_dbm: net.rssi,
            channel: net.channel,
        })
        .collect()
}

/// Map a `CLAuthorizationStatus` name to an [`AuthorizationState`].
///
/// `restricted` means a policy forbids the prompt, so it counts as denied.
/// Unknown names are treated as undetermined.
#[must_use]
pub fn parse_authorization_status(status: &str) -> AuthorizationState {
    match status {
        "authorized" | "authorizedAlways" | "authorizedWhenInUse" => AuthorizationState::Granted,
        "denied" | "restricted" => AuthorizationState::Denied,
        other => {
            if other != "notDetermined" {
                log::warn!("Unknown authorization status {:?}, treating as pending", other);
            }
            AuthorizationState::Pending
        }
    }
}
