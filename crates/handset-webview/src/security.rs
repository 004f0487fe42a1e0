//! Security gate: URL validation and sanitization, user agent selection and
//! sender authentication for privileged IPC.

use std::net::{IpAddr, Ipv6Addr};

use handset_common::{CapabilityToken, SecurityError};
use tracing::warn;
use url::Url;

use crate::events::Sender;

// =============================================================================
// SCHEMES
// =============================================================================

/// Script-injection and inline-data schemes, rejected unconditionally.
pub const DENIED_SCHEMES: &[&str] = &["javascript", "vbscript", "data"];

/// Schemes a tab may load. `file` additionally requires development mode.
pub const ALLOWED_SCHEMES: &[&str] = &["http", "https"];

/// Schemes `sanitize_url` leaves untouched.
const RECOGNIZED_SCHEMES: &[&str] = &[
    "http",
    "https",
    "file",
    "about",
    "data",
    "javascript",
    "vbscript",
    "blob",
    "ftp",
    "ws",
    "wss",
    "mailto",
    "view-source",
    "handset",
];

// =============================================================================
// GATE
// =============================================================================

/// User agent identities and the domain that gets the desktop one.
#[derive(Debug, Clone)]
pub struct UserAgents {
    pub streaming_domain: String,
    pub desktop: String,
    pub mobile: String,
}

#[derive(Debug)]
pub struct SecurityGate {
    token: CapabilityToken,
    dev_mode: bool,
    blocked_hosts: Vec<String>,
    internal_prefixes: Vec<String>,
    agents: UserAgents,
}

impl SecurityGate {
    pub fn new(token: CapabilityToken, agents: UserAgents) -> Self {
        Self {
            token,
            dev_mode: false,
            blocked_hosts: Vec::new(),
            internal_prefixes: Vec::new(),
            agents,
        }
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn with_blocked_hosts(mut self, hosts: impl IntoIterator<Item = String>) -> Self {
        self.blocked_hosts = hosts
            .into_iter()
            .map(|h| h.trim().trim_end_matches('.').to_ascii_lowercase())
            .filter(|h| !h.is_empty())
            .collect();
        self
    }

    /// Admit navigations to URLs under `prefix` (the generated pages).
    pub fn with_internal_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let prefix = normalize_url(&prefix).unwrap_or(prefix);
        self.internal_prefixes.push(prefix);
        self
    }

    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }

    /// The token handed to the trusted UI surface's init script.
    pub fn token(&self) -> &CapabilityToken {
        &self.token
    }

    /// Validate a URL a tab is asked to load.
    pub fn check_url(&self, url: &str) -> Result<(), SecurityError> {
        let trimmed = url.trim();
        if let Some(scheme) = scheme_of(trimmed) {
            if DENIED_SCHEMES.contains(&scheme.as_str()) {
                return Err(SecurityError::InvalidUrl(trimmed.to_string()));
            }
        }

        let parsed =
            Url::parse(trimmed).map_err(|_| SecurityError::InvalidUrl(trimmed.to_string()))?;

        let scheme = parsed.scheme();
        let allowed = ALLOWED_SCHEMES.contains(&scheme) || (scheme == "file" && self.dev_mode);
        if !allowed {
            return Err(SecurityError::InvalidUrl(trimmed.to_string()));
        }

        if let Some(host) = parsed.host_str() {
            if self.is_host_blocked(host) {
                return Err(SecurityError::BlockedHost(host.to_string()));
            }
        }

        Ok(())
    }

    pub fn is_valid_url(&self, url: &str) -> bool {
        self.check_url(url).is_ok()
    }

    /// Navigation check used by the engine callback and the tab manager.
    /// Generated pages and `about:blank` always pass.
    pub fn is_navigation_allowed(&self, url: &str) -> bool {
        self.is_internal(url) || url == "about:blank" || self.is_valid_url(url)
    }

    /// Whether `url` resolves to a location under an internal prefix. Dot
    /// segments are resolved first, so `pages/../..` cannot climb out.
    pub fn is_internal(&self, url: &str) -> bool {
        let Some(url) = normalize_url(url) else {
            return false;
        };
        self.internal_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }

    fn is_host_blocked(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.blocked_hosts.iter().any(|blocked| {
            host == *blocked
                || host
                    .strip_suffix(blocked.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        })
    }

    /// Confirm a privileged command came from the trusted UI surface and
    /// carries its capability token.
    pub fn authenticate(&self, sender: Sender, token: Option<&str>) -> Result<(), SecurityError> {
        if sender != Sender::Ui {
            warn!(%sender, "privileged command from non-UI surface rejected");
            return Err(SecurityError::UnauthorizedSender(sender.to_string()));
        }
        match token {
            Some(presented) if self.token.matches(presented) => Ok(()),
            _ => {
                warn!(%sender, "privileged command with missing or wrong token rejected");
                Err(SecurityError::UnauthorizedSender(sender.to_string()))
            }
        }
    }

    /// Desktop identity for the streaming domain and its subdomains,
    /// mobile identity for everything else.
    pub fn user_agent_for(&self, url: &str) -> &str {
        let streaming = self.agents.streaming_domain.to_ascii_lowercase();
        let matches = domain_of(url).is_some_and(|host| {
            host == streaming
                || host
                    .strip_suffix(streaming.as_str())
                    .is_some_and(|rest| rest.ends_with('.'))
        });
        if matches {
            &self.agents.desktop
        } else {
            &self.agents.mobile
        }
    }
}

// =============================================================================
// FREE FUNCTIONS
// =============================================================================

/// Lowercased hostname of `url`, if it has one.
pub fn domain_of(url: &str) -> Option<String> {
    Url::parse(url.trim())
        .ok()?
        .host_str()
        .map(|h| h.trim_end_matches('.').to_ascii_lowercase())
        .filter(|h| !h.is_empty())
}

/// Serialize `url` the way the engine will see it: scheme and host
/// lowercased, `.`/`..` segments (plain or percent-encoded) resolved.
pub fn normalize_url(url: &str) -> Option<String> {
    Url::parse(url.trim()).ok().map(String::from)
}

/// Turn address-bar input into a loadable URL.
///
/// Input with a recognized scheme passes through unchanged. Otherwise local
/// and private-network hosts get `http://`, everything else `https://`.
pub fn sanitize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if has_recognized_scheme(trimmed) {
        return trimmed.to_string();
    }

    if is_local_host(host_part(trimmed)) {
        format!("http://{trimmed}")
    } else {
        format!("https://{trimmed}")
    }
}

fn scheme_of(input: &str) -> Option<String> {
    let (scheme, _) = input.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic()
        || !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    {
        return None;
    }
    Some(scheme.to_ascii_lowercase())
}

fn has_recognized_scheme(input: &str) -> bool {
    match scheme_of(input) {
        Some(scheme) => {
            RECOGNIZED_SCHEMES.contains(&scheme.as_str())
                || input[scheme.len()..].starts_with("://")
        }
        None => false,
    }
}

/// Host portion of scheme-less input, port stripped.
fn host_part(input: &str) -> &str {
    let authority = input
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or(input);
    let authority = authority.rsplit('@').next().unwrap_or(authority);

    if let Some(rest) = authority.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match authority.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => authority,
    }
}

fn is_local_host(host: &str) -> bool {
    let host = host.to_ascii_lowercase();
    if host == "localhost" || host.ends_with(".localhost") || host.ends_with(".local") {
        return true;
    }
    match host.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => {
            v4.is_private() || v4.is_loopback() || v4.is_link_local() || v4.is_unspecified()
        }
        Ok(IpAddr::V6(v6)) => v6.is_loopback() || v6.is_unspecified() || is_unique_local(&v6),
        Err(_) => false,
    }
}

fn is_unique_local(addr: &Ipv6Addr) -> bool {
    (addr.segments()[0] & 0xfe00) == 0xfc00
}

// =============================================================================
// TESTS
// =============================================================================
