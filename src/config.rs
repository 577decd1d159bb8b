//! Configuration for the susa-aub importer
//!
//! Bootstrap configuration only: everything here is fixed for the lifetime
//! of one run. Settings priority follows the usual resolution order:
//!
//! 1. Command-line arguments (`--config`, `--output`)
//! 2. Environment variables (`SUSA_AUB_CONFIG`, `SUSA_AUB_OUTPUT`)
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants)
//!
//! Missing config file with no explicit path means zero-config startup on
//! built-in defaults.

use crate::error::{ImportError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Bootstrap configuration loaded from TOML file
///
/// **Minimal by design** - the importer has no runtime-mutable settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// Base URL of the SUSA-navet catalog API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Page size for the single-page fetch
    ///
    /// Both collections are fetched as one page far larger than any
    /// realistic collection, so pagination never kicks in.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Where the catalog artifact is written
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_base_url() -> String {
    "https://susanavet2.skolverket.se/api/1.1".to_string()
}

fn default_page_size() -> u32 {
    20_000_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_output_path() -> PathBuf {
    PathBuf::from("SUSA_AUB.json")
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout_secs(),
            output_path: default_output_path(),
        }
    }
}

impl TomlConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ImportError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: TomlConfig = toml::from_str(&raw).map_err(|e| {
            ImportError::Config(format!("Invalid config {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration from an optional file path
    ///
    /// An explicitly given path must exist; no path means built-in defaults
    /// (zero-config startup).
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let config = Self::load(p)?;
                info!(path = %p.display(), "Loaded configuration");
                Ok(config)
            }
            None => {
                info!("No config file given, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate field values
    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ImportError::Config("base_url must not be empty".to_string()));
        }
        if self.page_size == 0 {
            return Err(ImportError::Config("page_size must be non-zero".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ImportError::Config(
                "request_timeout_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
