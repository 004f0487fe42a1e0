//! URL policy settings consumed by the security gate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Development mode: additionally admits `file:` URLs.
    pub dev_mode: bool,
    /// Hostnames rejected outright. A listed host also blocks its subdomains.
    pub blocked_hosts: Vec<String>,
}
