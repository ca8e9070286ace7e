//! Linux host backed by sysfs and `iw`.
//!
//! Wireless interfaces are the entries of `/sys/class/net` that carry a
//! `wireless` or `phy80211` child. Scans shell out to `iw dev <iface> scan`
//! (or `scan dump`, which reads the kernel's cached results and usually
//! works without `CAP_NET_ADMIN`).
//!
//! Linux has no location gate in front of scan results, so the default
//! authorization methods of [`WirelessHost`] apply.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use super::{run_program, HostError, RawScanEntry, WirelessHost};

const DEFAULT_SYSFS_NET: &str = "/sys/class/net";
const SIX_GHZ_FIRST_MHZ: u32 = 5925;

/// Host implementation for Linux.
#[derive(Debug, Clone)]
pub struct LinuxIwHost {
    /// Directory listing network interfaces (normally `/sys/class/net`)
    sysfs_root: PathBuf,
    /// Program used for scanning
    iw_program: String,
    /// Read cached results with `scan dump` instead of triggering a scan
    use_dump: bool,
}

impl LinuxIwHost {
    /// Create a host reading `/sys/class/net` and running `iw` from `$PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_NET),
            iw_program: "iw".to_string(),
            use_dump: false,
        }
    }

    /// Use a different interface directory. Mostly useful for tests.
    #[must_use]
    pub fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    /// Use a different `iw` binary.
    #[must_use]
    pub fn with_iw_program(mut self, program: impl Into<String>) -> Self {
        self.iw_program = program.into();
        self
    }

    /// Read cached results (`iw dev <iface> scan dump`) when `enabled`.
    #[must_use]
    pub fn use_cached(mut self, enabled: bool) -> Self {
        self.use_dump = enabled;
        self
    }

    fn is_wireless(dir: &Path) -> bool {
        dir.join("wireless").exists() || dir.join("phy80211").exists()
    }

    fn is_up(dir: &Path) -> bool {
        fs::read_to_string(dir.join("operstate"))
            .map(|state| state.trim() == "up")
            .unwrap_or(false)
    }
}

impl Default for LinuxIwHost {
    fn default() -> Self {
        Self::new()
    }
}

impl WirelessHost for LinuxIwHost {
    fn interfaces(&self) -> Result<Vec<String>, HostError> {
        let entries = fs::read_dir(&self.sysfs_root).map_err(|source| HostError::Io {
            path: self.sysfs_root.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| Self::is_wireless(&entry.path()))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();

        // read_dir order is filesystem-dependent
        names.sort();
        Ok(names)
    }

    /// The first interface that is up, else the first wireless interface.
    fn default_interface(&self) -> Result<Option<String>, HostError> {
        let names = self.interfaces()?;
        let up = names
            .iter()
            .find(|name| Self::is_up(&self.sysfs_root.join(name)))
            .cloned();
        Ok(up.or_else(|| names.into_iter().next()))
    }

    fn scan(&self, interface: &str) -> Result<Vec<RawScanEntry>, HostError> {
        if !Self::is_wireless(&self.sysfs_root.join(interface)) {
            return Err(HostError::NoSuchInterface(interface.to_string()));
        }

        let mut args = vec!["dev", interface, "scan"];
        if self.use_dump {
            args.push("dump");
        }

        let stdout = run_program(&self.iw_program, &args)?;
        Ok(parse_iw_scan_output(&stdout))
    }
}

fn bss_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(r"^BSS ([0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5})").expect("valid BSS header regex")
    })
}

/// Fields collected for one `BSS` stanza.
#[derive(Default)]
struct BssStanza {
    bssid: String,
    ssid: Option<String>,
    signal_dbm: Option<f64>,
    freq_mhz: Option<u32>,
    channel: Option<u32>,
}

impl BssStanza {
    fn into_entry(self) -> RawScanEntry {
        // iw reports signal with two decimals
        let rssi_dbm = self.signal_dbm.map_or(-100, |dbm| dbm.round() as i32);
        // 6 GHz channel numbers restart at 1 and would read as 2.4GHz
        let channel = if matches!(self.freq_mhz, Some(SIX_GHZ_FIRST_MHZ..)) {
            None
        } else {
            self.channel.or_else(|| self.freq_mhz.and_then(freq_to_channel))
        };

        RawScanEntry {
            ssid: self.ssid,
            bssid: Some(self.bssid),
            rssi_dbm,
            channel,
        }
    }
}

/// Parse the text output of `iw dev <iface> scan [dump]`.
///
/// Stanzas start with `BSS aa:bb:cc:dd:ee:ff(on wlan0)` at column zero and
/// continue with indented `key: value` lines. Hidden networks report an empty
/// or NUL-filled SSID, both of which become `None`.
#[must_use]
pub fn parse_iw_scan_output(output: &str) -> Vec<RawScanEntry> {
    let mut entries = Vec::new();
    let mut current: Option<BssStanza> = None;

    for line in output.lines() {
        if let Some(caps) = bss_header().captures(line) {
            if let Some(stanza) = current.take() {
                entries.push(stanza.into_entry());
            }
            current = Some(BssStanza {
                bssid: caps[1].to_ascii_lowercase(),
                ..BssStanza::default()
            });
            continue;
        }

        let Some(stanza) = current.as_mut() else {
            continue;
        };

        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("SSID:") {
            stanza.ssid = parse_ssid(rest);
        } else if let Some(rest) = trimmed.strip_prefix("signal:") {
            stanza.signal_dbm = rest.split_whitespace().next().and_then(|n| n.parse().ok());
        } else if let Some(rest) = trimmed.strip_prefix("freq:") {
            stanza.freq_mhz = rest
                .trim()
                .parse::<f64>()
                .ok()
                .map(|mhz| mhz.round() as u32);
        } else if let Some(rest) = trimmed.strip_prefix("DS Parameter set: channel") {
            stanza.channel = rest.trim().parse().ok();
        } else if let Some(rest) = trimmed.strip_prefix("* primary channel:") {
            if stanza.channel.is_none() {
                stanza.channel = rest.trim().parse().ok();
            }
        }
    }

    if let Some(stanza) = current.take() {
        entries.push(stanza.into_entry());
    }

    log::trace!("Parsed {} BSS stanzas from iw output", entries.len());
    entries
}

fn parse_ssid(raw: &str) -> Option<String> {
    let ssid = raw.trim();
    let hidden = ssid.is_empty() || ssid.split("\\x00").all(str::is_empty);
    (!hidden).then(|| ssid.to_string())
}

/// Convert a centre frequency in MHz to an 802.11 channel number.
fn freq_to_channel(freq_mhz: u32) -> Option<u32> {
    match freq_mhz {
        2412..=2472 => Some((freq_mhz - 2407) / 5),
        2484 => Some(14),
        5160..=5885 => Some((freq_mhz - 5000) / 5),
        _ => None,
    }
}
