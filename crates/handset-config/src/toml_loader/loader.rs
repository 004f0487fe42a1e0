//! Core TOML config loading: read from path or platform default.

use crate::paths::config_file;
use crate::schema::HandsetConfig;
use crate::validation;
use handset_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::template::default_config_toml;

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. Invalid values are logged as a
/// warning and replaced by their defaults.
pub fn load_from_path(path: &Path) -> Result<HandsetConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let mut config: HandsetConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    for problem in validation::repair(&mut config) {
        warn!("config validation warning: {problem}, using default");
    }

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform default path, writing a documented default
/// file first if none exists.
pub fn load_default() -> Result<HandsetConfig, ConfigError> {
    let path = config_file()?;

    if !path.exists() {
        info!("no config found at {}, creating default", path.display());
        create_default_config(&path)?;
        return Ok(HandsetConfig::default());
    }

    load_from_path(&path)
}

/// Write the commented default config to `path`.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}
