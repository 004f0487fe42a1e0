//! Fixed per-tab table mapping each surface event kind to its handler.

use std::collections::HashMap;
use std::time::Instant;

use handset_common::{TabId, UiEvent};
use handset_webview::color::normalize_theme_color;
use handset_webview::pages::{
    error_text, is_http_error, ABORTED_CODE, CRASHED_CODE, ROOT_PLACEHOLDER,
};
use handset_webview::{domain_of, SurfaceEvent, SurfaceEventKind};
use tracing::{debug, error, info, warn};

use super::manager::TabManager;
use super::tab::TabState;

pub type Handler = fn(&mut TabManager, TabId, SurfaceEvent, Instant);

#[derive(Clone)]
pub struct HandlerTable {
    handlers: HashMap<SurfaceEventKind, Handler>,
}

impl HandlerTable {
    /// The table every tab is built with.
    pub fn standard() -> Self {
        let entries: [(SurfaceEventKind, Handler); 14] = [
            (SurfaceEventKind::DidStartLoading, TabManager::on_start_loading),
            (SurfaceEventKind::DidStopLoading, TabManager::on_stop_loading),
            (SurfaceEventKind::DidNavigate, TabManager::on_navigate),
            (SurfaceEventKind::TitleChanged, TabManager::on_title_changed),
            (SurfaceEventKind::WillNavigate, TabManager::on_will_navigate),
            (SurfaceEventKind::NewWindowRequested, TabManager::on_new_window),
            (SurfaceEventKind::ContextMenu, TabManager::on_context_menu),
            (SurfaceEventKind::RenderProcessGone, TabManager::on_render_process_gone),
            (SurfaceEventKind::DidFailLoad, TabManager::on_fail_load),
            (SurfaceEventKind::HttpResponse, TabManager::on_http_response),
            (SurfaceEventKind::ThemeColor, TabManager::on_theme_color),
            (SurfaceEventKind::EnterFullscreen, TabManager::on_enter_fullscreen),
            (SurfaceEventKind::LeaveFullscreen, TabManager::on_leave_fullscreen),
            (SurfaceEventKind::PreviewCaptured, TabManager::on_preview_captured),
        ];
        Self {
            handlers: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, kind: SurfaceEventKind) -> Option<Handler> {
        self.handlers.get(&kind).copied()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl TabManager {
    fn emit_cached_color(&mut self, id: TabId) {
        if let Some(color) = self.cached_color_for(id) {
            self.theme_color = Some(color.clone());
            self.emit(UiEvent::ThemeColorUpdated { color });
        }
    }

    fn on_start_loading(&mut self, id: TabId, _event: SurfaceEvent, _now: Instant) {
        let Some(tab) = self.tab_mut(id) else { return };
        if tab.state == TabState::Ready {
            tab.state = TabState::Loading;
        }
        if self.is_active(id) {
            self.emit(UiEvent::DidStartLoading);
            self.emit_cached_color(id);
        }
    }

    fn on_stop_loading(&mut self, id: TabId, _event: SurfaceEvent, _now: Instant) {
        let Some(tab) = self.tab_mut(id) else { return };
        if tab.state == TabState::Loading {
            tab.state = TabState::Ready;
        }
        if self.is_active(id) {
            self.emit(UiEvent::DidStopLoading);
            self.emit_cached_color(id);
        }
    }

    fn on_navigate(&mut self, id: TabId, event: SurfaceEvent, _now: Instant) {
        let SurfaceEvent::DidNavigate { url } = event else { return };
        let page = self.pages.classify(&url);
        let Some(tab) = self.tab_mut(id) else { return };

        tab.location = url.clone();
        tab.history.commit(&url);
        match page {
            Some(page) => {
                // Inline documents all commit as about:blank.
                let page = if url == "about:blank" {
                    tab.internal.unwrap_or(page)
                } else {
                    page
                };
                tab.internal = Some(page);
                tab.url = ROOT_PLACEHOLDER.to_string();
                tab.title = page.title().to_string();
            }
            None => {
                tab.internal = None;
                tab.url = url.clone();
                tab.last_external = Some(url);
            }
        }
        let shown = tab.url.clone();
        debug!(tab_id = %id, url = %shown, "navigated");

        if self.is_active(id) {
            self.emit(UiEvent::DidNavigate { url: shown });
        }
        self.emit_tabs_updated();
    }

    fn on_title_changed(&mut self, id: TabId, event: SurfaceEvent, _now: Instant) {
        let SurfaceEvent::TitleChanged { title } = event else { return };
        let Some(tab) = self.tab_mut(id) else { return };
        if tab.internal.is_some() || tab.title == title {
            return;
        }
        tab.title = title;
        self.emit_tabs_updated();
    }

    fn on_will_navigate(&mut self, id: TabId, event: SurfaceEvent, _now: Instant) {
        let SurfaceEvent::WillNavigate { url } = event else { return };
        if self.gate.is_navigation_allowed(&url) {
            self.apply_user_agent(id, &url);
            return;
        }

        // The surface vetoed the navigation before it started; stopping the
        // page here would abort loads of the document that is still showing.
        debug!(tab_id = %id, url = %url, "blocked navigation reported");
        self.emit(UiEvent::NavigationBlocked { url });
    }

    fn on_new_window(&mut self, id: TabId, event: SurfaceEvent, _now: Instant) {
        let SurfaceEvent::NewWindowRequested { url } = event else { return };
        if !self.gate.is_valid_url(&url) {
            warn!(tab_id = %id, url = %url, "new window blocked");
            self.emit(UiEvent::NavigationBlocked { url });
            return;
        }
        match self.create_tab(Some(&url)) {
            Ok(new_id) => {
                debug!(opener = %id, tab_id = %new_id, "new window opened as tab");
                if let Err(e) = self.switch_to_tab(new_id) {
                    warn!(tab_id = %new_id, error = %e, "failed to switch to new tab");
                }
            }
            Err(e) => warn!(opener = %id, url = %url, error = %e, "failed to open new tab"),
        }
    }

    fn on_context_menu(&mut self, id: TabId, _event: SurfaceEvent, _now: Instant) {
        let Some(tab) = self.tab(id) else { return };
        let items = self.context_menu_items(tab);
        self.menu_target = Some(id);
        self.emit(UiEvent::ContextMenu { tab_id: id, items });
    }

    fn on_render_process_gone(&mut self, id: TabId, event: SurfaceEvent, now: Instant) {
        let SurfaceEvent::RenderProcessGone { reason, exit_code } = event else { return };
        let policy = self.policy.crash.clone();
        let restore = self.bounds;
        let active = self.is_active(id);
        let Some(tab) = self.tab_mut(id) else { return };

        let was_fullscreen = tab.state == TabState::Fullscreen;
        if was_fullscreen {
            let bounds = tab.saved_bounds.take().unwrap_or(restore);
            if let Err(e) = tab.surface.set_bounds(bounds) {
                warn!(tab_id = %id, error = %e, "failed to restore bounds after crash");
            }
        }

        let count = tab.crashes.record(now, policy.window);
        tab.state = TabState::Crashed;
        let details = match exit_code {
            Some(code) => format!("{reason} (exit code {code})"),
            None => reason,
        };

        let give_up = count >= policy.max_auto_reloads;
        if give_up {
            tab.reload_at = None;
            error!(tab_id = %id, count, details = %details, "content process keeps crashing, not reloading");
        } else {
            tab.reload_at = Some(now + policy.reload_delay);
            warn!(tab_id = %id, count, details = %details, "content process gone, reload scheduled");
        }
        let failed_url = tab.last_external.clone().unwrap_or_default();

        if was_fullscreen && active {
            self.ui_fullscreen = false;
            self.relayout_requested = true;
            self.emit(UiEvent::FullscreenModeChanged { fullscreen: false });
        }
        if give_up {
            let text = error_text(CRASHED_CODE, &details);
            self.show_error(id, CRASHED_CODE, &text, &failed_url);
        }
        self.emit(UiEvent::RenderProcessGone { details });
    }

    fn on_fail_load(&mut self, id: TabId, event: SurfaceEvent, _now: Instant) {
        let SurfaceEvent::DidFailLoad {
            code,
            description,
            url,
            main_frame,
        } = event
        else {
            return;
        };
        if !main_frame || code == ABORTED_CODE {
            debug!(tab_id = %id, code, main_frame, "load failure ignored");
            return;
        }

        warn!(tab_id = %id, code, url = %url, "load failed");
        if self.is_active(id) {
            self.emit(UiEvent::DidFailLoad {
                code,
                description: description.clone(),
            });
        }
        let text = error_text(code, &description);
        self.show_error(id, code, &text, &url);
    }

    fn on_http_response(&mut self, id: TabId, event: SurfaceEvent, _now: Instant) {
        let SurfaceEvent::HttpResponse {
            status,
            url,
            main_frame,
        } = event
        else {
            return;
        };
        if !main_frame || !is_http_error(status) || self.pages.is_internal(&url) {
            return;
        }

        let code = i32::from(status);
        let text = error_text(code, "");
        info!(tab_id = %id, status, url = %url, "HTTP error response");
        if self.is_active(id) {
            self.emit(UiEvent::HttpError {
                code: status,
                text: text.clone(),
                url: url.clone(),
            });
        }
        self.show_error(id, code, &text, &url);
    }

    fn on_theme_color(&mut self, id: TabId, event: SurfaceEvent, now: Instant) {
        let SurfaceEvent::ThemeColor { color } = event else { return };
        let color = match normalize_theme_color(&color) {
            Ok(color) => color,
            Err(reason) => {
                warn!(tab_id = %id, %reason, "theme color rejected");
                return;
            }
        };
        let Some(tab) = self.tab(id) else { return };
        if let Some(domain) = domain_of(&tab.location) {
            self.cache.set(&domain, &color, now);
        }
        if self.is_active(id) {
            self.theme_color = Some(color.clone());
            self.emit(UiEvent::ThemeColorUpdated { color });
        }
    }

    fn on_enter_fullscreen(&mut self, id: TabId, _event: SurfaceEvent, _now: Instant) {
        let (normal, full) = (self.bounds, self.fullscreen_bounds);
        let Some(tab) = self.tab_mut(id) else { return };
        if tab.state == TabState::Fullscreen {
            return;
        }
        tab.saved_bounds = Some(normal);
        tab.state = TabState::Fullscreen;
        if let Err(e) = tab.surface.set_bounds(full) {
            warn!(tab_id = %id, error = %e, "failed to apply fullscreen bounds");
        }
        info!(tab_id = %id, "entered fullscreen");

        if self.is_active(id) {
            self.ui_fullscreen = true;
            self.relayout_requested = true;
            self.emit(UiEvent::FullscreenModeChanged { fullscreen: true });
        }
    }

    fn on_leave_fullscreen(&mut self, id: TabId, _event: SurfaceEvent, _now: Instant) {
        let normal = self.bounds;
        let Some(tab) = self.tab_mut(id) else { return };
        if tab.state != TabState::Fullscreen {
            return;
        }
        let bounds = tab.saved_bounds.take().unwrap_or(normal);
        tab.state = TabState::Ready;
        if let Err(e) = tab.surface.set_bounds(bounds) {
            warn!(tab_id = %id, error = %e, "failed to restore bounds");
        }
        info!(tab_id = %id, "left fullscreen");

        if self.is_active(id) {
            self.ui_fullscreen = false;
            self.relayout_requested = true;
            self.emit(UiEvent::FullscreenModeChanged { fullscreen: false });
        }
    }

    /// Last write wins. Closed tabs never get here.
    fn on_preview_captured(&mut self, id: TabId, event: SurfaceEvent, _now: Instant) {
        let SurfaceEvent::PreviewCaptured { data_url } = event else { return };
        if let Some(tab) = self.tab_mut(id) {
            tab.preview = Some(data_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_kind() {
        let table = HandlerTable::standard();
        assert_eq!(table.len(), SurfaceEventKind::ALL.len());
        for kind in SurfaceEventKind::ALL {
            assert!(table.get(kind).is_some(), "{kind:?} has no handler");
        }
    }
}
