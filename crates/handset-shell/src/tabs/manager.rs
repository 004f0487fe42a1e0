//! The tab manager: owns every tab and its surface.

use std::sync::Arc;
use std::time::Instant;

use handset_common::{
    Bounds, ContextMenuItem, EventBus, HandsetError, MenuAction, SurfaceError, TabId, TabSummary,
    UiEvent,
};
use handset_webview::pages::{blank_html, BLANK_TITLE, ERROR_TITLE, ROOT_PLACEHOLDER};
use handset_webview::{
    domain_of, sanitize_url, ContentSurface, EditCommand, InternalPage, PageDocument, PageStore,
    SecurityGate, SurfaceEvent, SurfaceFactory, SurfaceSpec,
};
use tracing::{debug, info, warn};

use crate::theme_cache::ThemeColorCache;

use super::handlers::HandlerTable;
use super::tab::{CrashTracker, NavHistory, Tab, TabState};
use super::TabPolicy;

/// Owns all tabs. Exactly one tab is active whenever the list is non-empty;
/// only the active tab's surface is visible.
pub struct TabManager {
    pub(super) factory: Box<dyn SurfaceFactory>,
    pub(super) gate: Arc<SecurityGate>,
    pub(super) pages: PageStore,
    pub(super) cache: ThemeColorCache,
    pub(super) bus: EventBus,
    pub(super) policy: TabPolicy,
    pub(super) tabs: Vec<Tab>,
    pub(super) active: Option<TabId>,
    pub(super) next_id: u32,
    pub(super) bounds: Bounds,
    pub(super) fullscreen_bounds: Bounds,
    /// Last color announced to the UI.
    pub(super) theme_color: Option<String>,
    /// Fullscreen state last announced to the UI.
    pub(super) ui_fullscreen: bool,
    /// Tab whose context menu is open.
    pub(super) menu_target: Option<TabId>,
    pub(super) relayout_requested: bool,
}

impl TabManager {
    pub fn new(
        factory: Box<dyn SurfaceFactory>,
        gate: Arc<SecurityGate>,
        pages: PageStore,
        cache: ThemeColorCache,
        bus: EventBus,
        policy: TabPolicy,
    ) -> Self {
        Self {
            factory,
            gate,
            pages,
            cache,
            bus,
            policy,
            tabs: Vec::new(),
            active: None,
            next_id: 1,
            bounds: Bounds::default(),
            fullscreen_bounds: Bounds::default(),
            theme_color: None,
            ui_fullscreen: false,
            menu_target: None,
            relayout_requested: false,
        }
    }

    // -- Accessors --

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active.and_then(|id| self.tab(id))
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn summaries(&self) -> Vec<TabSummary> {
        self.tabs.iter().map(Tab::summary).collect()
    }

    pub fn cache(&self) -> &ThemeColorCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ThemeColorCache {
        &mut self.cache
    }

    /// Last announced theme color, or the neutral default.
    pub fn theme_color(&self) -> String {
        self.theme_color
            .clone()
            .unwrap_or_else(|| self.policy.default_color.clone())
    }

    pub fn is_fullscreen(&self) -> bool {
        self.active_tab().is_some_and(Tab::is_fullscreen)
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(super) fn index_of(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    pub(super) fn tab_mut(&mut self, id: TabId) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    pub(super) fn is_active(&self, id: TabId) -> bool {
        self.active == Some(id)
    }

    pub(super) fn emit(&self, event: UiEvent) {
        self.bus.publish(event);
    }

    pub(super) fn emit_tabs_updated(&self) {
        self.emit(UiEvent::TabsUpdated {
            tabs: self.summaries(),
            active_id: self.active,
        });
    }

    /// Whether a fullscreen transition asked for a layout kick since the
    /// last call.
    pub fn take_relayout_request(&mut self) -> bool {
        std::mem::take(&mut self.relayout_requested)
    }

    // -- Layout --

    /// Apply freshly computed surface rectangles.
    pub fn set_layout(&mut self, normal: Bounds, fullscreen: Bounds) {
        self.bounds = normal;
        self.fullscreen_bounds = fullscreen;

        for tab in &mut self.tabs {
            if tab.saved_bounds.is_some() {
                tab.saved_bounds = Some(normal);
            }
        }

        if let Some(id) = self.active {
            let target = if self.is_fullscreen() { fullscreen } else { normal };
            if let Some(tab) = self.tab_mut(id) {
                if let Err(e) = tab.surface.set_bounds(target) {
                    warn!(tab_id = %id, error = %e, "failed to apply layout");
                }
            }
        }
    }

    // -- Lifecycle --

    /// Create a tab loading `url`, or the blank page when `url` is empty.
    /// The tab starts hidden; callers switch to it to show it.
    pub fn create_tab(&mut self, url: Option<&str>) -> Result<TabId, HandsetError> {
        let target = match url.map(str::trim).filter(|u| !u.is_empty()) {
            Some(raw) => {
                let url = sanitize_url(raw);
                self.gate.check_url(&url)?;
                Some(url)
            }
            None => None,
        };

        let (initial_url, inline) = match &target {
            Some(url) => (url.clone(), None),
            None => match self.pages.blank() {
                PageDocument::Url(url) => (url, None),
                PageDocument::Html(html) => ("about:blank".to_string(), Some(html)),
            },
        };

        let id = TabId(self.next_id);
        self.next_id += 1;

        let user_agent = self.gate.user_agent_for(&initial_url).to_string();
        let mut surface = self.factory.create(SurfaceSpec {
            tab_id: id,
            url: initial_url.clone(),
            user_agent: user_agent.clone(),
            bounds: self.bounds,
            visible: false,
        })?;

        if let Some(html) = inline {
            if let Err(e) = surface.load_html(&html) {
                warn!(tab_id = %id, error = %e, "failed to load blank page");
            }
        }

        let (title, shown_url, internal) = match &target {
            Some(url) => (url.clone(), url.clone(), None),
            None => (
                BLANK_TITLE.to_string(),
                ROOT_PLACEHOLDER.to_string(),
                Some(InternalPage::Blank),
            ),
        };

        info!(tab_id = %id, url = %initial_url, "tab created");
        self.tabs.push(Tab {
            id,
            surface,
            title,
            url: shown_url,
            location: initial_url,
            last_external: target,
            internal,
            preview: None,
            state: TabState::Loading,
            saved_bounds: None,
            user_agent,
            history: NavHistory::default(),
            crashes: CrashTracker::default(),
            reload_at: None,
            handlers: HandlerTable::standard(),
        });
        Ok(id)
    }

    /// Make `id` the visible tab.
    pub fn switch_to_tab(&mut self, id: TabId) -> Result<(), HandsetError> {
        if self.active == Some(id) {
            return Ok(());
        }
        let target = self.index_of(id).ok_or(SurfaceError::UnknownTab(id.0))?;

        if let Some(prev) = self.active.and_then(|p| self.index_of(p)) {
            let tab = &mut self.tabs[prev];
            if let Err(e) = tab.surface.capture_preview() {
                debug!(tab_id = %tab.id, error = %e, "preview capture skipped");
            }
            if let Err(e) = tab.surface.set_visible(false) {
                warn!(tab_id = %tab.id, error = %e, "failed to detach surface");
            }
        }

        let fullscreen = self.tabs[target].is_fullscreen();
        let bounds = if fullscreen {
            self.fullscreen_bounds
        } else {
            self.bounds
        };
        let tab = &mut self.tabs[target];
        if let Err(e) = tab.surface.set_bounds(bounds) {
            warn!(tab_id = %id, error = %e, "failed to position surface");
        }
        if let Err(e) = tab.surface.set_visible(true) {
            warn!(tab_id = %id, error = %e, "failed to attach surface");
        }
        if let Err(e) = tab.surface.focus() {
            debug!(tab_id = %id, error = %e, "failed to focus surface");
        }
        self.active = Some(id);
        debug!(tab_id = %id, "switched tab");

        let color = self
            .cached_color_for(id)
            .unwrap_or_else(|| self.policy.default_color.clone());
        self.theme_color = Some(color.clone());
        self.emit(UiEvent::ThemeColorUpdated { color });

        if fullscreen != self.ui_fullscreen {
            self.ui_fullscreen = fullscreen;
            self.relayout_requested = true;
            self.emit(UiEvent::FullscreenModeChanged { fullscreen });
        }

        self.emit(UiEvent::TabChanged {
            tab_id: id,
            tabs: self.summaries(),
        });
        Ok(())
    }

    /// Destroy `id`. Closing the active tab activates its predecessor, or a
    /// fresh blank tab when none is left.
    pub fn close_tab(&mut self, id: TabId) -> Result<(), HandsetError> {
        let idx = self.index_of(id).ok_or(SurfaceError::UnknownTab(id.0))?;
        let mut tab = self.tabs.remove(idx);
        if let Err(e) = tab.surface.set_visible(false) {
            debug!(tab_id = %id, error = %e, "failed to detach closing surface");
        }
        drop(tab);
        info!(tab_id = %id, "tab closed");

        if self.menu_target == Some(id) {
            self.menu_target = None;
        }

        if self.active != Some(id) {
            self.emit_tabs_updated();
            return Ok(());
        }

        self.active = None;
        let next = match self.tabs.get(idx.saturating_sub(1)) {
            Some(tab) => tab.id,
            None => self.create_tab(None)?,
        };
        self.switch_to_tab(next)
    }

    /// Destroy every tab and start over with one blank tab.
    pub fn close_all_tabs(&mut self) -> Result<TabId, HandsetError> {
        for mut tab in self.tabs.drain(..) {
            if let Err(e) = tab.surface.set_visible(false) {
                debug!(tab_id = %tab.id, error = %e, "failed to detach closing surface");
            }
        }
        self.active = None;
        self.menu_target = None;
        info!("all tabs closed");

        let id = self.create_tab(None)?;
        self.switch_to_tab(id)?;
        Ok(id)
    }

    /// Ask a fullscreen tab's document to leave fullscreen. The tab's own
    /// `LeaveFullscreen` report performs the transition.
    pub fn exit_fullscreen(&mut self, id: TabId) -> Result<(), HandsetError> {
        let tab = self.tab_mut(id).ok_or(SurfaceError::UnknownTab(id.0))?;
        if tab.state == TabState::Fullscreen {
            if let Err(e) = tab.surface.exit_fullscreen() {
                warn!(tab_id = %id, error = %e, "exit fullscreen request failed");
            }
        }
        Ok(())
    }

    /// Fire due crash reloads and the cache write.
    pub fn tick(&mut self, now: Instant) {
        for tab in &mut self.tabs {
            if tab.reload_at.is_some_and(|at| at <= now) {
                tab.reload_at = None;
                tab.state = TabState::Loading;
                info!(tab_id = %tab.id, "automatic reload after crash");
                if let Err(e) = tab.reload_natively() {
                    warn!(tab_id = %tab.id, error = %e, "automatic reload failed");
                }
            }
        }
        self.cache.tick(now);
    }

    /// Earliest pending timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tabs
            .iter()
            .filter_map(|t| t.reload_at)
            .chain(self.cache.deadline())
            .min()
    }

    /// Persist the cache and destroy every surface.
    pub fn shutdown(&mut self) {
        self.cache.shutdown();
        self.tabs.clear();
        self.active = None;
    }

    // -- Active tab control --

    fn active_mut(&mut self) -> Result<&mut Tab, SurfaceError> {
        let id = self.active.ok_or(SurfaceError::NoActiveTab)?;
        self.tab_mut(id).ok_or(SurfaceError::NoActiveTab)
    }

    fn active_ref(&self) -> Result<&Tab, SurfaceError> {
        self.active_tab().ok_or(SurfaceError::NoActiveTab)
    }

    /// Navigate the active tab. Rejected urls are reported as blocked.
    pub fn load_url(&mut self, raw: &str) -> Result<(), HandsetError> {
        let url = sanitize_url(raw);
        if let Err(e) = self.gate.check_url(&url) {
            warn!(url = %url, error = %e, "load rejected");
            self.emit(UiEvent::NavigationBlocked { url });
            return Err(e.into());
        }

        let id = self.active.ok_or(SurfaceError::NoActiveTab)?;
        self.apply_user_agent(id, &url);
        let tab = self.active_mut()?;
        tab.recover_from_crash();
        tab.surface.load_url(&url)?;
        Ok(())
    }

    pub fn go_back(&mut self) -> Result<(), HandsetError> {
        self.active_mut()?.surface.go_back()?;
        Ok(())
    }

    pub fn go_forward(&mut self) -> Result<(), HandsetError> {
        self.active_mut()?.surface.go_forward()?;
        Ok(())
    }

    /// Reload the active tab. A manual reload also cancels a pending
    /// automatic one.
    pub fn reload(&mut self) -> Result<(), HandsetError> {
        let tab = self.active_mut()?;
        let crashed = tab.state == TabState::Crashed;
        tab.recover_from_crash();
        if crashed {
            tab.reload_natively()?;
        } else {
            tab.surface.reload()?;
        }
        Ok(())
    }

    pub fn can_go_back(&self) -> Result<bool, HandsetError> {
        Ok(self.active_ref()?.can_go_back())
    }

    pub fn can_go_forward(&self) -> Result<bool, HandsetError> {
        Ok(self.active_ref()?.can_go_forward())
    }

    pub fn url(&self) -> Result<String, HandsetError> {
        Ok(self.active_ref()?.url.clone())
    }

    pub fn title(&self) -> Result<String, HandsetError> {
        Ok(self.active_ref()?.title.clone())
    }

    pub fn set_visible(&mut self, visible: bool) -> Result<(), HandsetError> {
        self.active_mut()?.surface.set_visible(visible)?;
        Ok(())
    }

    pub fn set_bounds(&mut self, bounds: Bounds) -> Result<(), HandsetError> {
        self.active_mut()?.surface.set_bounds(bounds)?;
        Ok(())
    }

    /// Run a context menu entry on the tab that opened the menu.
    pub fn context_menu_action(&mut self, action: MenuAction) -> Result<(), HandsetError> {
        let id = self
            .menu_target
            .take()
            .or(self.active)
            .ok_or(SurfaceError::NoActiveTab)?;
        let tab = self.tab_mut(id).ok_or(SurfaceError::UnknownTab(id.0))?;
        match action {
            MenuAction::Back => tab.surface.go_back()?,
            MenuAction::Forward => tab.surface.go_forward()?,
            MenuAction::Reload => {
                tab.recover_from_crash();
                tab.surface.reload()?
            }
            MenuAction::Copy => tab.surface.edit(EditCommand::Copy)?,
            MenuAction::Paste => tab.surface.edit(EditCommand::Paste)?,
            MenuAction::SelectAll => tab.surface.edit(EditCommand::SelectAll)?,
            MenuAction::Inspect => tab.surface.open_devtools()?,
        }
        Ok(())
    }

    pub(super) fn context_menu_items(&self, tab: &Tab) -> Vec<ContextMenuItem> {
        let item = |action, label: &str, enabled| ContextMenuItem {
            action,
            label: label.to_string(),
            enabled,
        };
        vec![
            item(MenuAction::Back, "Back", tab.can_go_back()),
            item(MenuAction::Forward, "Forward", tab.can_go_forward()),
            item(MenuAction::Reload, "Reload", true),
            item(MenuAction::Copy, "Copy", true),
            item(MenuAction::Paste, "Paste", true),
            item(MenuAction::SelectAll, "Select All", true),
            item(MenuAction::Inspect, "Inspect", self.gate.dev_mode()),
        ]
    }

    // -- Shared helpers for event handlers --

    /// Cached color for the tab's current domain. Refreshes the entry.
    pub(super) fn cached_color_for(&mut self, id: TabId) -> Option<String> {
        let domain = domain_of(&self.tab(id)?.location)?;
        self.cache.get(&domain)
    }

    /// Switch user agent when the destination needs a different identity.
    pub(super) fn apply_user_agent(&mut self, id: TabId, url: &str) {
        let desired = self.gate.user_agent_for(url).to_string();
        let Some(tab) = self.tab_mut(id) else {
            return;
        };
        if tab.user_agent == desired {
            return;
        }
        match tab.surface.set_user_agent(&desired) {
            Ok(()) => tab.user_agent = desired,
            Err(SurfaceError::NotSupported(what)) => {
                debug!(tab_id = %id, %what, "user agent kept");
            }
            Err(e) => warn!(tab_id = %id, error = %e, "failed to set user agent"),
        }
    }

    /// Replace the tab's content with a generated error document.
    pub(super) fn show_error(&mut self, id: TabId, code: i32, text: &str, url: &str) {
        let doc = self.pages.error(code, text, url);
        let Some(tab) = self.tab_mut(id) else {
            return;
        };
        let result = match &doc {
            PageDocument::Url(page) => tab.surface.load_url(page),
            PageDocument::Html(html) => tab.surface.load_html(html),
        };
        if let Err(e) = result {
            warn!(tab_id = %id, error = %e, "failed to show error page");
        }
        tab.url = ROOT_PLACEHOLDER.to_string();
        tab.title = ERROR_TITLE.to_string();
        tab.internal = Some(InternalPage::Error);
        info!(tab_id = %id, code, url = %url, "error page shown");
        self.emit_tabs_updated();
    }

    /// Route a surface event through the tab's handler table.
    pub fn handle_event(&mut self, id: TabId, event: SurfaceEvent, now: Instant) {
        let Some(tab) = self.tab(id) else {
            debug!(tab_id = %id, kind = ?event.kind(), "event for closed tab ignored");
            return;
        };
        match tab.handlers.get(event.kind()) {
            Some(handler) => handler(self, id, event, now),
            None => debug!(tab_id = %id, kind = ?event.kind(), "no handler"),
        }
    }
}

impl Tab {
    /// Manual navigation takes a crashed tab out of its crashed state.
    fn recover_from_crash(&mut self) {
        self.reload_at = None;
        if self.state == TabState::Crashed {
            self.state = TabState::Loading;
        }
    }

    /// Load the tab's document again through the engine. A script-driven
    /// reload needs a live renderer, which a crashed tab no longer has.
    ///
    /// An error page reloads the url that failed; an inline blank page is
    /// rendered again.
    fn reload_natively(&mut self) -> Result<(), SurfaceError> {
        let target = match self.internal {
            Some(InternalPage::Error) => self.last_external.clone(),
            Some(InternalPage::Blank) if self.location == "about:blank" => None,
            _ => Some(self.location.clone()),
        };
        match target {
            Some(url) => {
                debug!(tab_id = %self.id, url = %url, "reloading through the engine");
                self.surface.load_url(&url)
            }
            None => self.surface.load_html(&blank_html()),
        }
    }
}

impl Drop for TabManager {
    fn drop(&mut self) {
        if self.cache.is_dirty() || self.cache.deadline().is_some() {
            self.cache.flush();
        }
    }
}
