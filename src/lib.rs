//! lesscrowd - nearby Wi-Fi access point inventory
//!
//! Lists the host's wireless adapters, runs a scan on one of them, and shows
//! the access points it saw filtered by band and sorted by signal or channel.
//! Platform access goes through the [`host::WirelessHost`] port, so the whole
//! pipeline also runs against the in-memory host.

pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod output;
pub mod permission;
pub mod records;
pub mod registry;
pub mod scanner;
pub mod service;
pub mod view;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::error::ExitCode;
use crate::host::WirelessHost;
use crate::service::InventoryService;

/// Run the command line application.
///
/// # Errors
///
/// Returns configuration, scan and output failures. Scan failures keep
/// their [`scanner::ScanError`] so the caller can pick an exit code.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_cli(&cli);
    if config.no_color {
        yansi::disable();
    }

    match &cli.command {
        Commands::Adapters(args) => {
            config.merge_adapters_args(args);
            let host = host::native_host(&config);
            list_adapters(host, &config, &mut io::stdout().lock())
        }
        Commands::Scan(args) => {
            config.merge_scan_args(args);
            let host = host::native_host(&config);
            scan(host, &config, &mut io::stdout().lock())
        }
        Commands::Config => {
            let rendered = config.to_toml()?;
            print!("{}", rendered);
            Ok(ExitCode::Success)
        }
    }
}

/// Write the adapter list for `host`.
///
/// # Errors
///
/// Fails only if the output cannot be written.
pub fn list_adapters<W: Write>(
    host: Arc<dyn WirelessHost>,
    config: &Config,
    writer: &mut W,
) -> Result<ExitCode> {
    let service = InventoryService::new(host);
    let adapters = service.list_adapters();
    log::debug!("Found {} wireless adapter(s)", adapters.len());

    output::write_adapters(&adapters, config.output, writer)?;
    Ok(ExitCode::Success)
}

/// Scan once on the configured (or default) adapter and write the view.
///
/// Returns [`ExitCode::NoAccessPoints`] when the scan succeeded but nothing
/// passed the band filter.
///
/// # Errors
///
/// Returns the [`scanner::ScanError`] that stopped the scan, or an output
/// failure.
pub fn scan<W: Write>(host: Arc<dyn WirelessHost>, config: &Config, writer: &mut W) -> Result<ExitCode> {
    let service = InventoryService::new(host);
    service.refresh_adapters();

    if let Some(name) = &config.adapter {
        service.select_adapter(name)?;
    }

    let result = service.scan()?;
    let query = config.query();
    let view = service.view(&query);
    log::info!(
        "{} of {} access points on {} shown ({}, scanned {})",
        view.len(),
        result.len(),
        result.adapter(),
        query.band,
        result.completed_at().format("%H:%M:%S")
    );

    output::write_records(&view, config.output, writer).context("Failed to write scan results")?;

    if view.is_empty() {
        Ok(ExitCode::NoAccessPoints)
    } else {
        Ok(ExitCode::Success)
    }
}
