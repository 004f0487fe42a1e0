//! Configuration schema types for Handset.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod browser;
mod cache;
mod security;
mod system;
mod window;

pub use browser::*;
pub use cache::*;
pub use security::*;
pub use system::*;
pub use window::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandsetConfig {
    pub window: WindowConfig,
    pub browser: BrowserConfig,
    pub security: SecurityConfig,
    pub theme_cache: ThemeCacheConfig,
    pub crash: CrashConfig,
    pub logging: LoggingConfig,
}
