//! Tab management: surface lifecycle, switching, per-tab event handling.

use std::time::Duration;

use handset_config::HandsetConfig;

mod handlers;
mod manager;
mod tab;

#[cfg(test)]
mod tests;

pub use handlers::{Handler, HandlerTable};
pub use manager::TabManager;
pub use tab::{CrashTracker, NavHistory, Tab, TabState};

/// Automatic reload budget for crashed tabs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrashPolicy {
    /// Crashes inside `window` at or beyond this count stop auto reloads.
    pub max_auto_reloads: u32,
    pub window: Duration,
    pub reload_delay: Duration,
}

impl Default for CrashPolicy {
    fn default() -> Self {
        Self {
            max_auto_reloads: 3,
            window: Duration::from_secs(10),
            reload_delay: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabPolicy {
    pub crash: CrashPolicy,
    /// Color announced for tabs whose domain has no cached color.
    pub default_color: String,
}

impl Default for TabPolicy {
    fn default() -> Self {
        Self {
            crash: CrashPolicy::default(),
            default_color: "#ffffff".to_string(),
        }
    }
}

impl TabPolicy {
    pub fn from_config(config: &HandsetConfig) -> Self {
        Self {
            crash: CrashPolicy {
                max_auto_reloads: config.crash.max_auto_reloads,
                window: Duration::from_secs(config.crash.window_secs),
                reload_delay: Duration::from_millis(config.crash.reload_delay_ms),
            },
            default_color: config.theme_cache.default_color.clone(),
        }
    }
}
