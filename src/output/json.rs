//! JSON output for adapters and scan views.
//!
//! # Output Schema
//!
//! `lesscrowd scan --output json`:
//!
//! ```json
//! [
//!   {
//!     "ssid": "Cafe5G",
//!     "bssid": "a4:2b:b0:11:22:33",
//!     "signalDbm": -48,
//!     "channel": 149,
//!     "band": "5GHz"
//!   },
//!   { "ssid": null, "bssid": null, "signalDbm": -70, "channel": 11, "band": "2.4GHz" }
//! ]
//! ```
//!
//! `lesscrowd adapters --output json`:
//!
//! ```json
//! [{ "name": "en0", "isDefault": true }]
//! ```

use std::io::Write;

use serde::Serialize;

use crate::records::ScanRecord;
use crate::registry::WirelessAdapter;

/// One access point in JSON form.
///
/// Unreadable names and missing addresses are `null` rather than their
/// display placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonRecord {
    /// Network name, `null` when unreadable
    pub ssid: Option<String>,
    /// Colon-separated MAC, `null` when unavailable
    pub bssid: Option<String>,
    /// Signal strength in dBm
    pub signal_dbm: i32,
    /// Channel number
    pub channel: Option<u32>,
    /// "2.4GHz" or "5GHz"
    pub band: Option<&'static str>,
}

impl JsonRecord {
    /// Convert a canonical record.
    #[must_use]
    pub fn from_record(record: &ScanRecord) -> Self {
        Self {
            ssid: record.ssid.as_str().map(str::to_owned),
            bssid: record.bssid.to_mac_string(),
            signal_dbm: record.signal_dbm,
            channel: record.channel,
            band: record.band().map(|b| b.label()),
        }
    }
}

/// One adapter in JSON form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAdapter {
    /// Interface name
    pub name: String,
    /// Whether this is the host default
    pub is_default: bool,
}

impl JsonAdapter {
    /// Convert a registry adapter.
    #[must_use]
    pub fn from_adapter(adapter: &WirelessAdapter) -> Self {
        Self {
            name: adapter.name().to_string(),
            is_default: adapter.is_default(),
        }
    }
}

/// A JSON document: an array of records or adapters.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct JsonOutput<T: Serialize> {
    items: Vec<T>,
}

impl JsonOutput<JsonRecord> {
    /// Array of access points, in view order.
    ///
    /// # Example
    ///
    /// ```
    /// use lesscrowd::output::json::JsonOutput;
    ///
    /// let output = JsonOutput::records(&[]);
    /// assert_eq!(output.to_json().unwrap(), "[]");
    /// ```
    #[must_use]
    pub fn records(records: &[ScanRecord]) -> Self {
        Self {
            items: records.iter().map(JsonRecord::from_record).collect(),
        }
    }
}

impl JsonOutput<JsonAdapter> {
    /// Array of adapters, in host order.
    #[must_use]
    pub fn adapters(adapters: &[WirelessAdapter]) -> Self {
        Self {
            items: adapters.iter().map(JsonAdapter::from_adapter).collect(),
        }
    }
}

impl<T: Serialize> JsonOutput<T> {
    /// Serialize to compact JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Write pretty JSON plus a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), JsonOutputError> {
        serde_json::to_writer_pretty(&mut *writer, self)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Errors that can occur during JSON output.
#[derive(thiserror::Error, Debug)]
pub enum JsonOutputError {
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during writing
    #[error("I/O error during JSON generation: {0}")]
    Io(#[from] std::io::Error),
}
