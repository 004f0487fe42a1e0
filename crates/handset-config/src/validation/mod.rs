//! Full configuration validation.
//!
//! [`validate`] collects every problem into a single
//! `ConfigError::ValidationError`; [`repair`] resets each offending value to
//! its default instead.

mod helpers;


use crate::schema::HandsetConfig;
use handset_common::ConfigError;

use helpers::{check_range, is_bare_hostname, is_hex_color, validate_hostname, validate_range};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HandsetConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    let cache = &config.theme_cache;
    validate_range(&mut errors, "theme_cache.capacity", cache.capacity.into(), 1, 10_000);
    validate_range(&mut errors, "theme_cache.debounce_ms", cache.debounce_ms, 0, 60_000);
    if !is_hex_color(&cache.default_color) {
        errors.push(format!(
            "theme_cache.default_color = {:?} is not a hex color",
            cache.default_color
        ));
    }

    let crash = &config.crash;
    validate_range(&mut errors, "crash.max_auto_reloads", crash.max_auto_reloads.into(), 1, 10);
    validate_range(&mut errors, "crash.window_secs", crash.window_secs, 1, 3_600);
    validate_range(&mut errors, "crash.reload_delay_ms", crash.reload_delay_ms, 0, 60_000);

    validate_hostname(
        &mut errors,
        "browser.streaming_domain",
        &config.browser.streaming_domain,
    );
    for host in &config.security.blocked_hosts {
        validate_hostname(&mut errors, "security.blocked_hosts", host);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Reset every invalid value to its default. Returns one message per reset.
pub fn repair(config: &mut HandsetConfig) -> Vec<String> {
    let defaults = HandsetConfig::default();
    let mut reset = Vec::new();

    let cache = &mut config.theme_cache;
    if let Some(msg) = check_range("theme_cache.capacity", cache.capacity.into(), 1, 10_000) {
        reset.push(msg);
        cache.capacity = defaults.theme_cache.capacity;
    }
    if let Some(msg) = check_range("theme_cache.debounce_ms", cache.debounce_ms, 0, 60_000) {
        reset.push(msg);
        cache.debounce_ms = defaults.theme_cache.debounce_ms;
    }
    if !is_hex_color(&cache.default_color) {
        reset.push(format!(
            "theme_cache.default_color = {:?} is not a hex color",
            cache.default_color
        ));
        cache.default_color = defaults.theme_cache.default_color.clone();
    }

    let crash = &mut config.crash;
    if let Some(msg) = check_range("crash.max_auto_reloads", crash.max_auto_reloads.into(), 1, 10) {
        reset.push(msg);
        crash.max_auto_reloads = defaults.crash.max_auto_reloads;
    }
    if let Some(msg) = check_range("crash.window_secs", crash.window_secs, 1, 3_600) {
        reset.push(msg);
        crash.window_secs = defaults.crash.window_secs;
    }
    if let Some(msg) = check_range("crash.reload_delay_ms", crash.reload_delay_ms, 0, 60_000) {
        reset.push(msg);
        crash.reload_delay_ms = defaults.crash.reload_delay_ms;
    }

    let browser = &mut config.browser;
    if !is_bare_hostname(&browser.streaming_domain) {
        reset.push(format!(
            "browser.streaming_domain = {:?} is not a bare hostname",
            browser.streaming_domain
        ));
        browser.streaming_domain = defaults.browser.streaming_domain.clone();
    }

    // Bad block-list entries are dropped; the rest stay in force.
    config.security.blocked_hosts.retain(|host| {
        let ok = is_bare_hostname(host);
        if !ok {
            reset.push(format!("security.blocked_hosts entry {host:?} is not a bare hostname, dropped"));
        }
        ok
    });

    reset
}
