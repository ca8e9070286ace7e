//! Raw host entry to [`ScanRecord`] mapping.

use super::{Bssid, ScanRecord, Ssid};
use crate::host::RawScanEntry;

/// Map one raw entry to its canonical record.
///
/// - a missing or blank SSID becomes [`Ssid::Unreadable`]
/// - a missing, malformed, or all-zero BSSID becomes [`Bssid::Unavailable`]
/// - channel `0` counts as absent
#[must_use]
pub fn normalize(raw: RawScanEntry) -> ScanRecord {
    let ssid = match raw.ssid {
        Some(name) if !name.trim().is_empty() => Ssid::Named(name),
        _ => Ssid::Unreadable,
    };

    let bssid = match raw.bssid.as_deref().and_then(parse_mac) {
        Some(mac) if mac != [0; 6] => Bssid::Known(mac),
        Some(_) => {
            log::trace!("Treating zeroed BSSID as redacted");
            Bssid::Unavailable
        }
        None => {
            if let Some(text) = raw.bssid.as_deref().filter(|t| !t.is_empty()) {
                log::trace!("Unparseable BSSID {:?}", text);
            }
            Bssid::Unavailable
        }
    };

    ScanRecord {
        ssid,
        bssid,
        signal_dbm: raw.rssi_dbm,
        channel: raw.channel.filter(|&c| c > 0),
    }
}

/// Normalize a whole scan, preserving host order.
#[must_use]
pub fn normalize_all(raw: Vec<RawScanEntry>) -> Vec<ScanRecord> {
    raw.into_iter().map(normalize).collect()
}

/// Parse a MAC address written as six hex groups separated by `:` or `-`.
///
/// Groups may be a single digit (`a:b:c:d:e:f`), as some hosts print them.
#[must_use]
pub fn parse_mac(text: &str) -> Option<[u8; 6]> {
    let text = text.trim();
    let separator = if text.contains('-') { '-' } else { ':' };

    let mut bytes = [0u8; 6];
    let mut groups = text.split(separator);
    for byte in &mut bytes {
        let group = groups.next()?;
        if group.is_empty() || group.len() > 2 {
            return None;
        }
        *byte = u8::from_str_radix(group, 16).ok()?;
    }

    groups.next().is_none().then_some(bytes)
}
