//! Canonical scan records.
//!
//! Raw host entries are turned into [`ScanRecord`]s by the [`normalize`]
//! submodule. A record's band is never stored; it is always derived from
//! the channel number by [`Band::from_channel`].

pub mod normalize;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use normalize::{normalize, normalize_all, parse_mac};

/// Highest channel number classified as 2.4 GHz.
pub const MAX_2_4GHZ_CHANNEL: u32 = 13;

/// Text shown for a network whose name could not be read.
pub const UNREADABLE_SSID: &str = "Read Error";

/// Frequency band, derived from the channel number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    /// Channels 1 through 13
    Ghz2_4,
    /// Every channel above 13
    Ghz5,
}

impl Band {
    /// Classify a channel. Channels up to 13 are 2.4 GHz, everything else 5 GHz.
    #[must_use]
    pub fn from_channel(channel: u32) -> Self {
        if channel <= MAX_2_4GHZ_CHANNEL {
            Self::Ghz2_4
        } else {
            Self::Ghz5
        }
    }

    /// Label used in every output format.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ghz2_4 => "2.4GHz",
            Self::Ghz5 => "5GHz",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Network name, or the marker for one that could not be read.
///
/// Hidden and unreadable names both collapse to [`Ssid::Unreadable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ssid {
    /// A readable network name
    Named(String),
    /// Hidden, redacted, or unreadable
    Unreadable,
}

impl Ssid {
    /// The name, if readable.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Unreadable => None,
        }
    }
}

impl fmt::Display for Ssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or(UNREADABLE_SSID))
    }
}

/// Access point hardware address, or the sentinel for a missing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bssid {
    /// A real 6-byte MAC address
    Known([u8; 6]),
    /// Absent, redacted, or unparseable
    Unavailable,
}

impl Bssid {
    /// Colon-separated lowercase hex, if known.
    #[must_use]
    pub fn to_mac_string(&self) -> Option<String> {
        match self {
            Self::Known([a, b, c, d, e, g]) => {
                Some(format!("{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}"))
            }
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for Bssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_mac_string() {
            Some(mac) => f.write_str(&mac),
            None => f.write_str("unavailable"),
        }
    }
}

/// One access point in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanRecord {
    /// Network name
    pub ssid: Ssid,
    /// Access point address
    pub bssid: Bssid,
    /// Signal strength in dBm (more negative is weaker)
    pub signal_dbm: i32,
    /// 802.11 channel number, if the host reported one
    pub channel: Option<u32>,
}

impl ScanRecord {
    /// Derived band, `None` when the channel is absent.
    #[must_use]
    pub fn band(&self) -> Option<Band> {
        self.channel.map(Band::from_channel)
    }
}

/// Records produced by exactly one scan, in host order.
///
/// Immutable once built; a later scan replaces it rather than merging.
#[derive(Debug, Clone)]
pub struct ScanResult {
    adapter: String,
    completed_at: DateTime<Utc>,
    records: Arc<[ScanRecord]>,
}

impl ScanResult {
    /// Wrap the records of a completed scan.
    #[must_use]
    pub fn new(adapter: impl Into<String>, records: Vec<ScanRecord>) -> Self {
        Self {
            adapter: adapter.into(),
            completed_at: Utc::now(),
            records: Arc::from(records),
        }
    }

    /// Adapter the scan ran on.
    #[must_use]
    pub fn adapter(&self) -> &str {
        &self.adapter
    }

    /// When the scan completed.
    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Records in host order.
    #[must_use]
    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the scan saw nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
