//! Window creation and surface setup.

use std::path::PathBuf;
use std::sync::Arc;

use handset_common::{CapabilityToken, HandsetError};
use handset_config::{paths, HandsetConfig};
use handset_shell::{
    HostWindow, IpcGateway, Orchestrator, TabManager, TabPolicy, ThemeColorCache,
};
use handset_webview::{
    ContentProvider, PageStore, SecurityGate, UiSurface, UserAgents, WrySurfaceFactory,
};
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::core::HandsetApp;
use super::host::{full_window_bounds, WinitHost};

// =============================================================================
// INITIALIZATION
// =============================================================================

impl HandsetApp {
    /// Create the window, the UI surface and the orchestrator, then open the
    /// first tab. Returns `false` if the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let orientation = self.config.window.orientation;
        let size = handset_layout::window_dimensions(orientation);
        let min = handset_layout::min_window_size(orientation);

        let attrs = WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(size.width, size.height))
            .with_min_inner_size(LogicalSize::new(min.width, min.height));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        if let Err(e) = self.initialize_surfaces(&window) {
            tracing::error!("Failed to initialize surfaces: {e}");
            return false;
        }

        self.window = Some(window);
        tracing::info!(?orientation, "Window created and surfaces initialized");
        true
    }

    fn initialize_surfaces(&mut self, window: &Arc<Window>) -> Result<(), HandsetError> {
        let pages = PageStore::new(paths::pages_dir()?);
        let gate = Arc::new(build_gate(&self.config, &pages));

        let host = WinitHost::new(Arc::clone(window));
        let ui = UiSurface::new(
            window.as_ref(),
            full_window_bounds(host.inner_size()),
            paths::ui_partition_dir()?,
            ContentProvider::new(ui_dir(&self.config)),
            self.queue.clone(),
            &gate,
        )?;

        let factory = WrySurfaceFactory::new(
            Arc::clone(window),
            paths::content_partition_dir()?,
            self.queue.clone(),
            Arc::clone(&gate),
        );
        let cache = ThemeColorCache::from_config(paths::theme_cache_file()?, &self.config.theme_cache);
        let tabs = TabManager::new(
            Box::new(factory),
            Arc::clone(&gate),
            pages,
            cache,
            self.bus.clone(),
            TabPolicy::from_config(&self.config),
        );

        let mut orchestrator = Orchestrator::new(
            host,
            tabs,
            IpcGateway::new(gate),
            self.bus.clone(),
            self.config.window.orientation,
        );

        let start_url = self
            .start_url
            .clone()
            .or_else(|| Some(self.config.browser.home_url.clone()))
            .filter(|url| !url.trim().is_empty());
        orchestrator.start(start_url.as_deref())?;

        self.ui = Some(ui);
        self.orchestrator = Some(orchestrator);
        Ok(())
    }
}

/// Security gate for this session. Generated pages are always navigable.
fn build_gate(config: &HandsetConfig, pages: &PageStore) -> SecurityGate {
    let agents = UserAgents {
        streaming_domain: config.browser.streaming_domain.clone(),
        desktop: config.browser.desktop_user_agent.clone(),
        mobile: config.browser.mobile_user_agent.clone(),
    };
    let gate = SecurityGate::new(CapabilityToken::generate(), agents)
        .with_dev_mode(config.security.dev_mode)
        .with_blocked_hosts(config.security.blocked_hosts.iter().cloned());
    match pages.url_prefix() {
        Some(prefix) => gate.with_internal_prefix(prefix),
        None => gate,
    }
}

/// Bundled UI directory. Relative paths resolve against the working directory.
fn ui_dir(config: &HandsetConfig) -> PathBuf {
    let dir = PathBuf::from(&config.browser.ui_dir);
    let dir = if dir.is_relative() {
        std::env::current_dir().unwrap_or_default().join(dir)
    } else {
        dir
    };
    if !dir.is_dir() {
        tracing::warn!(
            path = %dir.display(),
            "UI directory not found, the frame will have no bundled content"
        );
    }
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_admits_generated_pages() {
        let dir = tempfile::tempdir().unwrap();
        let pages = PageStore::new(dir.path());
        let gate = build_gate(&HandsetConfig::default(), &pages);

        let prefix = pages.url_prefix().unwrap();
        assert!(gate.is_navigation_allowed(&format!("{prefix}blank.html")));
        assert!(!gate.is_valid_url("file:///etc/passwd"));
    }

    #[test]
    fn gate_follows_config() {
        let mut config = HandsetConfig::default();
        config.security.dev_mode = true;
        config.security.blocked_hosts = vec!["ads.example".into()];
        let gate = build_gate(&config, &PageStore::in_memory());

        assert!(gate.dev_mode());
        assert!(gate.is_valid_url("file:///tmp/page.html"));
        assert!(!gate.is_valid_url("https://cdn.ads.example/x.js"));
        assert_eq!(gate.user_agent_for("https://www.youtube.com/"), config.browser.desktop_user_agent);
    }

    #[test]
    fn absolute_ui_dir_is_kept() {
        let mut config = HandsetConfig::default();
        config.browser.ui_dir = "/opt/handset/ui".into();
        assert_eq!(ui_dir(&config), PathBuf::from("/opt/handset/ui"));
    }
}
