//! Process configuration.
//!
//! Sources, later ones winning:
//! 1. built-in defaults
//! 2. optional JSON file (`STOREFRONT_CONFIG`, default `config.json`; a missing file is fine)
//! 3. `STOREFRONT_DATA_DIR`, `STOREFRONT_PLACEMENT`, `STOREFRONT_LOG_FORMAT`
//!
//! The loaded value is passed around explicitly; nothing here is global.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storefront_observability::LogFormat;

use crate::placement::PlacementPolicy;

pub const CONFIG_PATH_ENV: &str = "STOREFRONT_CONFIG";
pub const DATA_DIR_ENV: &str = "STOREFRONT_DATA_DIR";
pub const PLACEMENT_ENV: &str = "STOREFRONT_PLACEMENT";
pub const LOG_FORMAT_ENV: &str = "STOREFRONT_LOG_FORMAT";

const DEFAULT_CONFIG_PATH: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Service name, used in log output.
    pub name: String,
    /// Directory holding seed data files.
    pub data_dir: PathBuf,
    pub placement: PlacementPolicy,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: "storefront".to_string(),
            data_dir: PathBuf::from("data"),
            placement: PlacementPolicy::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    /// Load from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let path = lookup(CONFIG_PATH_ENV).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    /// Read a JSON config file; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }

        if let Some(policy) = lookup(PLACEMENT_ENV) {
            self.placement = policy.parse::<PlacementPolicy>().map_err(|e| {
                ConfigError::Invalid {
                    key: PLACEMENT_ENV,
                    message: e.to_string(),
                }
            })?;
        }

        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            self.log_format = format
                .parse::<LogFormat>()
                .map_err(|message| ConfigError::Invalid {
                    key: LOG_FORMAT_ENV,
                    message,
                })?;
        }

        Ok(())
    }

    /// Seed file for the stock table.
    pub fn products_file(&self) -> PathBuf {
        self.data_dir.join("products.json")
    }
}
