//! Commented default config written on first launch.

/// The default `config.toml`. Every key shown is the built-in default.
pub fn default_config_toml() -> &'static str {
    r##"# Handset configuration
# Remove or comment out any key to fall back to its built-in default.

[window]
title = "Handset"
# "portrait" or "landscape"
orientation = "portrait"

[browser]
# Leave empty to open new tabs on the blank page.
home_url = ""
# This domain and its subdomains receive the desktop user agent.
streaming_domain = "youtube.com"
# Directory with the bundled UI, served as handset://localhost/
ui_dir = "ui"

[security]
# Development mode also admits file: URLs.
dev_mode = false
# Hosts (and their subdomains) that tabs may never load.
blocked_hosts = []

[theme_cache]
capacity = 100
debounce_ms = 1000
default_color = "#ffffff"

[crash]
max_auto_reloads = 3
window_secs = 10
reload_delay_ms = 2000

[logging]
# trace, debug, info, warn, error
level = "info"
"##
}
