use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

use crate::error_handling::types::ConfigError;

/// Runtime configuration for the storage bridge binary.
///
/// Loaded from a TOML file. Every field is optional so an empty file (or no
/// file at all) yields a usable default.
///
/// # Fields Overview
///
/// - `durable_dir`: directory backing the durable store. When absent the
///   `IPE_STORAGE_DIR` environment variable, then the current directory, are
///   used instead.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub durable_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::TomlError(e.to_string()))?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(dir) = &self.durable_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(ConfigError::NotADirectory(dir.display().to_string()));
            }
        }
        Ok(())
    }
}
