use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{global_config_dir, Config, ConfigFile, GLOBAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
use crate::{Error, Result};

/// Builds a [`Config`] from its layers
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config: Config,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults, global file, project or explicit file, then environment
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let mut loader = Self::new();
        loader.load_global()?;
        loader.load_project(explicit)?;
        loader.merge_env_vars();
        Ok(loader.into_config())
    }

    pub fn load_global(&mut self) -> Result<()> {
        if let Some(dir) = global_config_dir() {
            self.load_file(&dir.join(GLOBAL_CONFIG_FILE))?;
        }
        Ok(())
    }

    /// Load `./paddock.toml`, or `explicit` when given.
    ///
    /// An explicitly named file must exist.
    pub fn load_project(&mut self, explicit: Option<&Path>) -> Result<()> {
        match explicit {
            Some(path) => {
                if !self.load_file(path)? {
                    return Err(Error::Config(format!(
                        "config file {} does not exist",
                        path.display()
                    )));
                }
            }
            None => {
                self.load_file(&PathBuf::from(PROJECT_CONFIG_FILE))?;
            }
        }
        Ok(())
    }

    /// Overlay one file if it exists; returns whether it was read
    pub fn load_file(&mut self, path: &Path) -> Result<bool> {
        if !path.is_file() {
            debug!("No configuration at {}", path.display());
            return Ok(false);
        }
        let content = fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&content)?;
        self.config.apply(file);
        debug!("Loaded configuration from {}", path.display());
        Ok(true)
    }

    pub fn merge_env_vars(&mut self) {
        self.config.merge_env_vars();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }
}
