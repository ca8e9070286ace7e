//! Command-line interface definitions for lesscrowd.
//!
//! Global options (verbosity, color, config file) come first, then one of
//! the subcommands. Options left unset on the command line fall back to the
//! configuration file and `LESSCROWD_*` environment variables.
//!
//! # Example
//!
//! ```bash
//! # List wireless adapters
//! lesscrowd adapters
//!
//! # Scan on the default adapter, strongest first
//! lesscrowd scan
//!
//! # Only 5 GHz networks on en1, by channel, as JSON
//! lesscrowd scan --adapter en1 --band 5ghz --sort channel --order asc --output json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::view::{BandFilter, SortDirection, SortKey};

/// Nearby Wi-Fi access point inventory.
///
/// Lists wireless adapters, scans for access points, and shows them filtered
/// by band and sorted by signal or channel.
#[derive(Debug, Parser)]
#[command(name = "lesscrowd")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH", env = "LESSCROWD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List wireless adapters on this host
    Adapters(AdaptersArgs),
    /// Scan for nearby access points
    Scan(ScanArgs),
    /// Print the effective configuration as TOML
    Config,
}

/// Arguments for the adapters subcommand.
#[derive(Debug, Args)]
pub struct AdaptersArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Adapter to scan on (defaults to the host default adapter)
    #[arg(short, long, value_name = "NAME")]
    pub adapter: Option<String>,

    /// Band to show
    #[arg(short, long, value_enum)]
    pub band: Option<BandFilter>,

    /// Field to sort by
    #[arg(short, long, value_enum)]
    pub sort: Option<SortKey>,

    /// Sort direction (numeric; for signal, `asc` puts the weakest first)
    #[arg(long, value_enum)]
    pub order: Option<SortDirection>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

/// Output format for adapters and scan results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON for scripting
    Json,
    /// CSV for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
