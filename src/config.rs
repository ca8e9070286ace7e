//! Layered application configuration.
//!
//! Values are merged in increasing priority:
//!
//! 1. Built-in defaults
//! 2. `config.toml` (from `--config` or the platform config directory)
//! 3. `LESSCROWD_*` environment variables
//! 4. Command-line flags
//!
//! # Example file
//!
//! ```toml
//! adapter = "en1"
//! band = "5ghz"
//! sort = "channel"
//! order = "asc"
//! output = "table"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::{AdaptersArgs, Cli, OutputFormat, ScanArgs};
use crate::host::corewlan::DEFAULT_HELPER;
use crate::registry::suggest;
use crate::view::{BandFilter, SortDirection, SortKey, ViewQuery};

/// Prefix for environment overrides, e.g. `LESSCROWD_BAND=5ghz`.
pub const ENV_PREFIX: &str = "LESSCROWD_";

const KNOWN_KEYS: &[&str] = &[
    "adapter",
    "band",
    "sort",
    "order",
    "output",
    "macos_helper",
    "iw_scan_dump",
    "no_color",
];

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// The file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML.
    #[error("Invalid TOML in {path}: {source}")]
    Syntax {
        /// File that failed
        path: PathBuf,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },

    /// The file names a setting that does not exist.
    #[error("Unknown config key '{key}'{}", did_you_mean(.suggestion))]
    UnknownKey {
        /// Key as written
        key: String,
        /// Closest known key
        suggestion: Option<String>,
    },

    /// A value has the wrong type or an unsupported variant.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),

    /// The effective configuration could not be rendered.
    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|s| format!(" (did you mean '{s}'?)"))
        .unwrap_or_default()
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preferred adapter; the host default when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapter: Option<String>,
    /// Band filter for scan views.
    pub band: BandFilter,
    /// Sort key for scan views.
    pub sort: SortKey,
    /// Sort direction for scan views.
    pub order: SortDirection,
    /// Output format.
    pub output: OutputFormat,
    /// CoreWLAN helper binary (macOS).
    pub macos_helper: String,
    /// Read the kernel's cached results (`iw scan dump`) instead of triggering a scan (Linux).
    pub iw_scan_dump: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            adapter: None,
            band: BandFilter::default(),
            sort: SortKey::default(),
            order: SortDirection::default(),
            output: OutputFormat::default(),
            macos_helper: DEFAULT_HELPER.to_string(),
            iw_scan_dump: false,
            no_color: false,
        }
    }
}

impl Config {
    /// Default `config.toml` location for this platform.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "lesscrowd", "lesscrowd").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the configuration.
    ///
    /// With `explicit` set, that file must exist. Otherwise the platform file
    /// is used when present and defaults apply when it is not.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a missing explicit file, unreadable or
    /// malformed TOML, unknown keys, or values of the wrong type.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::default_path().filter(|path| path.exists()),
        };

        match &path {
            Some(path) => log::debug!("Loading configuration from {}", path.display()),
            None => log::debug!("No config file, using defaults and environment"),
        }
        Self::load_from_path(path.as_deref())
    }

    /// Load defaults, then `path` (if any), then the environment.
    ///
    /// # Errors
    ///
    /// See [`Config::load`].
    pub fn load_from_path(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            check_keys(path)?;
        }
        Self::figment(path).extract().map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// The provider stack used by [`Config::load_from_path`].
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).only(KNOWN_KEYS))
    }

    /// Apply global CLI flags.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if cli.no_color {
            self.no_color = true;
        }
    }

    /// Apply `scan` flags; unset flags keep the configured value.
    pub fn merge_scan_args(&mut self, args: &ScanArgs) {
        if let Some(adapter) = &args.adapter {
            self.adapter = Some(adapter.clone());
        }
        if let Some(band) = args.band {
            self.band = band;
        }
        if let Some(sort) = args.sort {
            self.sort = sort;
        }
        if let Some(order) = args.order {
            self.order = order;
        }
        if let Some(output) = args.output {
            self.output = output;
        }
    }

    /// Apply `adapters` flags.
    pub fn merge_adapters_args(&mut self, args: &AdaptersArgs) {
        if let Some(output) = args.output {
            self.output = output;
        }
    }

    /// View query described by the band and sort settings.
    #[must_use]
    pub fn query(&self) -> ViewQuery {
        ViewQuery::new(self.band, self.sort, self.order)
    }

    /// Render as TOML, the format `config.toml` is read in.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Render` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Reject keys figment would otherwise silently ignore.
fn check_keys(path: &Path) -> Result<(), ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table: toml::Table = content.parse().map_err(|source| ConfigError::Syntax {
        path: path.to_path_buf(),
        source,
    })?;

    match table.keys().find(|key| !KNOWN_KEYS.contains(&key.as_str())) {
        Some(key) => Err(ConfigError::UnknownKey {
            key: key.clone(),
            suggestion: suggest(key, KNOWN_KEYS.iter().copied()),
        }),
        None => Ok(()),
    }
}
