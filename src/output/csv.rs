//! CSV output for spreadsheets.
//!
//! # Columns
//!
//! Scan views: `ssid`, `bssid`, `signal_dbm`, `channel`, `band`. Unreadable
//! names and missing addresses are empty cells.
//!
//! Adapters: `name`, `is_default`.

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::records::ScanRecord;
use crate::registry::WirelessAdapter;

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct RecordRow<'a> {
    ssid: Option<&'a str>,
    bssid: Option<String>,
    signal_dbm: i32,
    channel: Option<u32>,
    band: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct AdapterRow<'a> {
    name: &'a str,
    is_default: bool,
}

/// CSV formatter for a projected view.
pub struct CsvOutput<'a> {
    records: &'a [ScanRecord],
}

impl<'a> CsvOutput<'a> {
    /// Create a formatter over `records`.
    #[must_use]
    pub fn new(records: &'a [ScanRecord]) -> Self {
        Self { records }
    }

    /// Write a header row followed by one row per record.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.records.is_empty() {
            csv_writer.write_record(["ssid", "bssid", "signal_dbm", "channel", "band"])?;
        }
        for record in self.records {
            csv_writer.serialize(RecordRow {
                ssid: record.ssid.as_str(),
                bssid: record.bssid.to_mac_string(),
                signal_dbm: record.signal_dbm,
                channel: record.channel,
                band: record.band().map(|b| b.label()),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Generate CSV output as a string.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if serialization fails.
    pub fn to_string(&self) -> Result<String, CsvOutputError> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// CSV formatter for the adapter list.
pub struct AdapterCsv<'a> {
    adapters: &'a [WirelessAdapter],
}

impl<'a> AdapterCsv<'a> {
    /// Create a formatter over `adapters`.
    #[must_use]
    pub fn new(adapters: &'a [WirelessAdapter]) -> Self {
        Self { adapters }
    }

    /// Write a header row followed by one row per adapter.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        if self.adapters.is_empty() {
            csv_writer.write_record(["name", "is_default"])?;
        }
        for adapter in self.adapters {
            csv_writer.serialize(AdapterRow {
                name: adapter.name(),
                is_default: adapter.is_default(),
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
