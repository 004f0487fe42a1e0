//! Platform directories used by Handset.

use std::fs;
use std::path::PathBuf;

use handset_common::ConfigError;

pub(crate) const APP_NAME: &str = "handset";

/// Platform config directory, e.g. `~/.config/handset` on Linux.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Platform data directory, e.g. `~/.local/share/handset` on Linux.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Platform cache directory, e.g. `~/.cache/handset` on Linux.
pub fn cache_dir() -> Result<PathBuf, ConfigError> {
    Ok(dirs::cache_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine cache directory".into()))?
        .join(APP_NAME))
}

/// `config_dir()/config.toml`
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// `data_dir()/theme-colors.json`
pub fn theme_cache_file() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("theme-colors.json"))
}

/// Storage partition shared by content surfaces, kept apart from the UI's.
pub fn content_partition_dir() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("partition").join("content"))
}

/// Storage partition of the trusted UI surface.
pub fn ui_partition_dir() -> Result<PathBuf, ConfigError> {
    Ok(data_dir()?.join("partition").join("ui"))
}

/// Generated blank and error documents.
pub fn pages_dir() -> Result<PathBuf, ConfigError> {
    Ok(cache_dir()?.join("pages"))
}

/// Create every Handset directory that does not exist yet.
pub fn ensure_dirs() -> Result<(), ConfigError> {
    for dir in [
        config_dir()?,
        data_dir()?,
        content_partition_dir()?,
        ui_partition_dir()?,
        pages_dir()?,
    ] {
        fs::create_dir_all(&dir).map_err(|e| {
            ConfigError::ParseError(format!("failed to create {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}
