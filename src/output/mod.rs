//! Output formatters for adapter lists and scan views.
//!
//! - Table for terminals
//! - JSON for scripting
//! - CSV for spreadsheet import
//!
//! # Example
//!
//! ```
//! use lesscrowd::cli::OutputFormat;
//! use lesscrowd::output::write_records;
//!
//! let mut out = Vec::new();
//! write_records(&[], OutputFormat::Json, &mut out).unwrap();
//! assert_eq!(out, b"[]\n");
//! ```

pub mod csv;
pub mod json;
pub mod table;

use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::OutputFormat;
use crate::records::ScanRecord;
use crate::registry::WirelessAdapter;

pub use self::csv::{AdapterCsv, CsvOutput};
pub use self::json::JsonOutput;
pub use self::table::{AdapterTable, TableOutput};

/// Write a scan view in `format`.
///
/// # Errors
///
/// Fails if serialization or the write fails.
pub fn write_records<W: Write>(records: &[ScanRecord], format: OutputFormat, writer: &mut W) -> Result<()> {
    match format {
        OutputFormat::Table => TableOutput::new(records)
            .write_to(writer)
            .context("Failed to write table")?,
        OutputFormat::Json => JsonOutput::records(records)
            .write_to(writer)
            .context("Failed to write JSON")?,
        OutputFormat::Csv => CsvOutput::new(records)
            .write_to(writer)
            .context("Failed to write CSV")?,
    }
    Ok(())
}

/// Write the adapter list in `format`.
///
/// # Errors
///
/// Fails if serialization or the write fails.
pub fn write_adapters<W: Write>(
    adapters: &[WirelessAdapter],
    format: OutputFormat,
    writer: &mut W,
) -> Result<()> {
    match format {
        OutputFormat::Table => AdapterTable::new(adapters)
            .write_to(writer)
            .context("Failed to write table")?,
        OutputFormat::Json => JsonOutput::adapters(adapters)
            .write_to(writer)
            .context("Failed to write JSON")?,
        OutputFormat::Csv => AdapterCsv::new(adapters)
            .write_to(writer)
            .context("Failed to write CSV")?,
    }
    Ok(())
}
