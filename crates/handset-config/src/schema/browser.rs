//! Content-surface browsing settings.

use serde::{Deserialize, Serialize};

pub const DEFAULT_DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub const DEFAULT_MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";

/// Settings for the content surfaces (tabs).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// URL opened in new tabs. Empty means the generated blank page.
    pub home_url: String,
    /// Domain (and its subdomains) that always gets the desktop user agent.
    pub streaming_domain: String,
    pub desktop_user_agent: String,
    pub mobile_user_agent: String,
    /// Directory holding the bundled UI served over `handset://`.
    pub ui_dir: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            home_url: String::new(),
            streaming_domain: "youtube.com".into(),
            desktop_user_agent: DEFAULT_DESKTOP_USER_AGENT.into(),
            mobile_user_agent: DEFAULT_MOBILE_USER_AGENT.into(),
            ui_dir: "ui".into(),
        }
    }
}
