//! Theme color cache and crash recovery tuning.

use serde::{Deserialize, Serialize};

/// Per-domain theme color cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeCacheConfig {
    /// Maximum number of domains kept (valid range: 1-10000).
    pub capacity: u32,
    /// Quiet period before a pending write hits disk, in milliseconds.
    pub debounce_ms: u64,
    /// Color shown when a tab's domain has no cached color yet.
    pub default_color: String,
}

impl Default for ThemeCacheConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            debounce_ms: 1000,
            default_color: "#ffffff".into(),
        }
    }
}

/// Automatic reload after a content process crash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashConfig {
    /// Crashes inside one window at which auto reload stops.
    pub max_auto_reloads: u32,
    /// Seconds of calm after which the crash counter starts over.
    pub window_secs: u64,
    /// Delay before an automatic reload, in milliseconds.
    pub reload_delay_ms: u64,
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self {
            max_auto_reloads: 3,
            window_secs: 10,
            reload_delay_ms: 2000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_cache_defaults() {
        let config = ThemeCacheConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.debounce_ms, 1000);
        assert_eq!(config.default_color, "#ffffff");
    }

    #[test]
    fn crash_defaults() {
        let config = CrashConfig::default();
        assert_eq!(config.max_auto_reloads, 3);
        assert_eq!(config.window_secs, 10);
        assert_eq!(config.reload_delay_ms, 2000);
    }
}
