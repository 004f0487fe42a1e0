//! A single tab and its per-tab bookkeeping.

use std::time::{Duration, Instant};

use handset_common::{Bounds, TabId, TabSummary};
use handset_webview::{ContentSurface, InternalPage};

use super::handlers::HandlerTable;

/// Lifecycle of a tab. `Closed` is represented by removal from the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Loading,
    Ready,
    Fullscreen,
    Crashed,
}

pub struct Tab {
    pub(crate) id: TabId,
    pub(crate) surface: Box<dyn ContentSurface>,
    /// Displayed title; "Blank Page" or the error title for internal pages.
    pub(crate) title: String,
    /// Displayed url; the root placeholder for internal pages.
    pub(crate) url: String,
    /// Last url the engine actually committed.
    pub(crate) location: String,
    /// Last committed url that was not an internal page.
    pub(crate) last_external: Option<String>,
    /// Which generated document is showing, if any.
    pub(crate) internal: Option<InternalPage>,
    pub(crate) preview: Option<String>,
    pub(crate) state: TabState,
    pub(crate) saved_bounds: Option<Bounds>,
    pub(crate) user_agent: String,
    pub(crate) history: NavHistory,
    pub(crate) crashes: CrashTracker,
    /// Pending automatic reload after a crash. Dropped with the tab.
    pub(crate) reload_at: Option<Instant>,
    pub(crate) handlers: HandlerTable,
}

impl Tab {
    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn state(&self) -> TabState {
        self.state
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.state == TabState::Fullscreen
    }

    pub fn reload_deadline(&self) -> Option<Instant> {
        self.reload_at
    }

    pub fn crash_count(&self) -> u32 {
        self.crashes.count()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    pub fn summary(&self) -> TabSummary {
        TabSummary {
            id: self.id,
            title: self.title.clone(),
            url: self.url.clone(),
            preview: self.preview.clone(),
        }
    }
}

/// Mirror of the page's session history, inferred from committed urls.
///
/// The engine does not expose its history, so a commit that matches the
/// neighbouring entry is read as a back or forward step.
#[derive(Debug, Default, Clone)]
pub struct NavHistory {
    entries: Vec<String>,
    index: usize,
}

impl NavHistory {
    pub fn commit(&mut self, url: &str) {
        if self.entries.is_empty() {
            self.entries.push(url.to_string());
            self.index = 0;
            return;
        }
        if self.entries[self.index] == url {
            return;
        }
        if self.index > 0 && self.entries[self.index - 1] == url {
            self.index -= 1;
            return;
        }
        if self.entries.get(self.index + 1).is_some_and(|next| next == url) {
            self.index += 1;
            return;
        }
        self.entries.truncate(self.index + 1);
        self.entries.push(url.to_string());
        self.index = self.entries.len() - 1;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }
}

/// Crash counter over a rolling window.
#[derive(Debug, Default, Clone)]
pub struct CrashTracker {
    count: u32,
    last: Option<Instant>,
}

impl CrashTracker {
    /// Record a crash at `now` and return the updated count. The count
    /// restarts when more than `window` has passed since the last crash.
    pub fn record(&mut self, now: Instant, window: Duration) -> u32 {
        if self
            .last
            .is_some_and(|last| now.saturating_duration_since(last) > window)
        {
            self.count = 0;
        }
        self.count += 1;
        self.last = Some(now);
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}
