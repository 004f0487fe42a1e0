//! Handset configuration system.
//!
//! TOML-based configuration with full validation. Every section uses
//! serde defaults so a partial (or empty) config file works out of the box;
//! invalid values are reset to their defaults with a warning.
//!
//! ```rust,no_run
//! let config = handset_config::load_config().expect("failed to load config");
//! println!("{}", config.browser.streaming_domain);
//! ```

pub mod paths;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{HandsetConfig, CONFIG_SCHEMA_VERSION};

use handset_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, creating it if missing.
pub fn load_config() -> Result<HandsetConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit path (the `--config` override).
pub fn load_config_from(path: &Path) -> Result<HandsetConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    toml_loader::load_from_path(path)
}
