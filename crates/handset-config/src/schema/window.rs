//! Window configuration types.

use handset_common::Orientation;
use serde::{Deserialize, Serialize};

/// Top-level window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Static window title.
    pub title: String,
    /// Orientation the device frame starts in.
    pub orientation: Orientation,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Handset".into(),
            orientation: Orientation::Portrait,
        }
    }
}
