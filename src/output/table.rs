//! Human-readable table output.
//!
//! ```text
//! Access points detected: 3
//!   CH 149  Cafe5G      [a4:2b:b0:11:22:33]  5GHz    -48 dBm
//!   CH   6  Cafe2.4     [a4:2b:b0:11:22:34]  2.4GHz  -61 dBm
//!   CH  11  Read Error  [unavailable]        2.4GHz  -70 dBm
//! ```
//!
//! Colors come from `yansi` and are switched off globally by `--no-color`.

use std::io::{self, Write};

use yansi::{Paint, Painted};

use crate::records::ScanRecord;
use crate::registry::WirelessAdapter;

/// Strongest signal still painted green.
const STRONG_DBM: i32 = -60;
/// Weakest signal still painted yellow; anything below is red.
const FAIR_DBM: i32 = -75;

/// Table formatter for a projected view.
pub struct TableOutput<'a> {
    records: &'a [ScanRecord],
}

impl<'a> TableOutput<'a> {
    /// Create a formatter over `records`, already filtered and sorted.
    #[must_use]
    pub fn new(records: &'a [ScanRecord]) -> Self {
        Self { records }
    }

    /// Write the header and one row per record.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(
            writer,
            "{} {}",
            "Access points detected:".bold(),
            self.records.len()
        )?;

        let ssid_width = column_width(self.records.iter().map(|r| r.ssid.to_string()));
        let bssid_width = column_width(self.records.iter().map(|r| r.bssid.to_string())) + 2;

        for record in self.records {
            // Projected views never contain channel-less records
            let channel = record.channel.map_or_else(|| "-".to_string(), |c| c.to_string());
            let band = record.band().map_or("", |b| b.label());

            let ssid = format!("{:<ssid_width$}", record.ssid.to_string());
            let ssid = if record.ssid.as_str().is_some() {
                ssid.bold()
            } else {
                ssid.dim().italic()
            };

            writeln!(
                writer,
                "  {} {:>3}  {}  {:<bssid_width$}  {:<6}  {}",
                "CH".dim(),
                channel,
                ssid,
                format!("[{}]", record.bssid),
                band,
                signal(record.signal_dbm)
            )?;
        }
        Ok(())
    }

    /// Render to a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

/// Table formatter for the adapter list.
pub struct AdapterTable<'a> {
    adapters: &'a [WirelessAdapter],
}

impl<'a> AdapterTable<'a> {
    /// Create a formatter over `adapters`.
    #[must_use]
    pub fn new(adapters: &'a [WirelessAdapter]) -> Self {
        Self { adapters }
    }

    /// Write the header and one row per adapter, marking the default.
    ///
    /// # Errors
    ///
    /// Propagates I/O errors from `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(
            writer,
            "{} {}",
            "Wireless adapters:".bold(),
            self.adapters.len()
        )?;
        for adapter in self.adapters {
            if adapter.is_default() {
                writeln!(writer, "  {}  {}", adapter.name().bold(), "(default)".green())?;
            } else {
                writeln!(writer, "  {}", adapter.name())?;
            }
        }
        Ok(())
    }

    /// Render to a string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut buffer = Vec::new();
        let _ = self.write_to(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

fn column_width(values: impl Iterator<Item = String>) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0)
}

fn signal(dbm: i32) -> Painted<String> {
    let text = Painted::new(format!("{:>4} dBm", dbm));
    if dbm >= STRONG_DBM {
        text.green()
    } else if dbm >= FAIR_DBM {
        text.yellow()
    } else {
        text.red()
    }
}
