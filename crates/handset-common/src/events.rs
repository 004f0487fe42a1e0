//! Events the core emits toward the trusted UI surface.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::warn;

use crate::types::{Orientation, TabId};

/// What the UI needs to redraw one entry of its tab strip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    pub id: TabId,
    pub title: String,
    pub url: String,
    pub preview: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuAction {
    Back,
    Forward,
    Reload,
    Copy,
    Paste,
    SelectAll,
    Inspect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextMenuItem {
    pub action: MenuAction,
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum UiEvent {
    TabChanged {
        #[serde(rename = "tabId")]
        tab_id: TabId,
        tabs: Vec<TabSummary>,
    },
    TabsUpdated {
        tabs: Vec<TabSummary>,
        #[serde(rename = "activeId")]
        active_id: Option<TabId>,
    },
    ThemeColorUpdated {
        color: String,
    },
    NavigationBlocked {
        url: String,
    },
    DidStartLoading,
    DidStopLoading,
    DidNavigate {
        url: String,
    },
    DidFailLoad {
        code: i32,
        description: String,
    },
    HttpError {
        code: u16,
        text: String,
        url: String,
    },
    RenderProcessGone {
        details: String,
    },
    FullscreenModeChanged {
        fullscreen: bool,
    },
    OrientationChanged {
        orientation: Orientation,
    },
    ContextMenu {
        #[serde(rename = "tabId")]
        tab_id: TabId,
        items: Vec<ContextMenuItem>,
    },
    CommandReply {
        id: u64,
        ok: bool,
        result: serde_json::Value,
        error: Option<String>,
    },
}

impl UiEvent {
    /// Split into the `(kind, payload)` pair the UI-side dispatcher expects.
    pub fn to_message(&self) -> (String, serde_json::Value) {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(mut obj)) => {
                let kind = obj
                    .remove("type")
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_default();
                let payload = obj.remove("data").unwrap_or(serde_json::Value::Null);
                (kind, payload)
            }
            Ok(other) => {
                warn!(?other, "UI event serialized to a non-object");
                (String::new(), serde_json::Value::Null)
            }
            Err(e) => {
                warn!(error = %e, "failed to serialize UI event");
                (String::new(), serde_json::Value::Null)
            }
        }
    }
}

#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<UiEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: UiEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

/// Drain every event currently buffered on `rx` without waiting.
///
/// A lagged receiver skips the overwritten events and keeps draining.
pub fn drain(rx: &mut broadcast::Receiver<UiEvent>) -> Vec<UiEvent> {
    let mut out = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(event) => out.push(event),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!(skipped, "UI event receiver lagged");
            }
            Err(_) => break,
        }
    }
    out
}
