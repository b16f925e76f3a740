//! Runtime configuration
//!
//! Values are layered: built-in defaults, the global `config.toml`, the
//! project `paddock.toml` (or an explicit file), then `PADDOCK_*`
//! environment variables. Command-line flags are applied last by the binary.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

pub mod loader;

pub use loader::ConfigLoader;

use crate::output::FormatType;

/// File name of the global and project configuration files
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";
pub const PROJECT_CONFIG_FILE: &str = "paddock.toml";

pub const ENV_DATA_DIR: &str = "PADDOCK_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "PADDOCK_LOG_LEVEL";
pub const ENV_FORMAT: &str = "PADDOCK_FORMAT";
pub const ENV_CACHE_SNAPSHOTS: &str = "PADDOCK_CACHE_SNAPSHOTS";

/// Global paddock directory holding the user-wide configuration
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("org", "paddock", "paddock").map(|dirs| dirs.data_dir().to_path_buf())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the CSV dump
    pub data_dir: PathBuf,
    /// Tracing filter directive, overrides `-v` when set
    pub log_level: Option<String>,
    pub format: FormatType,
    /// Memoize snapshots per scope for the lifetime of the process
    pub cache_snapshots: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            log_level: None,
            format: FormatType::default(),
            cache_snapshots: true,
        }
    }
}

/// One configuration file; absent keys leave the lower layer untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub format: Option<FormatType>,
    pub cache_snapshots: Option<bool>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlay the keys present in a configuration file
    pub fn apply(&mut self, file: ConfigFile) {
        if let Some(data_dir) = file.data_dir {
            self.data_dir = data_dir;
        }
        if let Some(log_level) = file.log_level {
            self.log_level = Some(log_level);
        }
        if let Some(format) = file.format {
            self.format = format;
        }
        if let Some(cache_snapshots) = file.cache_snapshots {
            self.cache_snapshots = cache_snapshots;
        }
    }

    pub fn merge_env_vars(&mut self) {
        self.merge_env_from(|key| std::env::var(key).ok());
    }

    /// Apply `PADDOCK_*` overrides from an arbitrary lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn merge_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(data_dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(data_dir);
        }

        if let Some(log_level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = Some(log_level);
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            match format.parse() {
                Ok(format) => self.format = format,
                Err(e) => warn!("Ignoring {}: {}", ENV_FORMAT, e),
            }
        }

        if let Some(cache) = lookup(ENV_CACHE_SNAPSHOTS) {
            match cache.parse::<bool>() {
                Ok(value) => self.cache_snapshots = value,
                Err(_) => warn!("Ignoring {}: expected true or false", ENV_CACHE_SNAPSHOTS),
            }
        }
    }
}
