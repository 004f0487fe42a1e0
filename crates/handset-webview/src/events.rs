//! Inbound events from content surfaces and the UI surface.

use std::fmt;
use std::sync::{Arc, Mutex};

use handset_common::TabId;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Which surface a message came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The trusted UI surface.
    Ui,
    /// An untrusted content surface.
    Tab(TabId),
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ui => f.write_str("ui"),
            Self::Tab(id) => write!(f, "{id}"),
        }
    }
}

/// Lifecycle events a content surface reports about itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    DidStartLoading,
    DidStopLoading,
    DidNavigate {
        url: String,
    },
    TitleChanged {
        title: String,
    },
    /// The page is about to navigate. Emitted for allowed and vetoed
    /// navigations alike; the tab manager re-checks and reports.
    WillNavigate {
        url: String,
    },
    /// The page asked for a new top-level window (e.g. `target="_blank"`).
    NewWindowRequested {
        url: String,
    },
    ContextMenu {
        x: f64,
        y: f64,
    },
    RenderProcessGone {
        reason: String,
        exit_code: Option<i32>,
    },
    DidFailLoad {
        code: i32,
        description: String,
        url: String,
        main_frame: bool,
    },
    HttpResponse {
        status: u16,
        url: String,
        main_frame: bool,
    },
    ThemeColor {
        color: String,
    },
    EnterFullscreen,
    LeaveFullscreen,
    PreviewCaptured {
        data_url: String,
    },
}

/// Discriminant of [`SurfaceEvent`], used as the handler table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceEventKind {
    DidStartLoading,
    DidStopLoading,
    DidNavigate,
    TitleChanged,
    WillNavigate,
    NewWindowRequested,
    ContextMenu,
    RenderProcessGone,
    DidFailLoad,
    HttpResponse,
    ThemeColor,
    EnterFullscreen,
    LeaveFullscreen,
    PreviewCaptured,
}

impl SurfaceEventKind {
    pub const ALL: [SurfaceEventKind; 14] = [
        Self::DidStartLoading,
        Self::DidStopLoading,
        Self::DidNavigate,
        Self::TitleChanged,
        Self::WillNavigate,
        Self::NewWindowRequested,
        Self::ContextMenu,
        Self::RenderProcessGone,
        Self::DidFailLoad,
        Self::HttpResponse,
        Self::ThemeColor,
        Self::EnterFullscreen,
        Self::LeaveFullscreen,
        Self::PreviewCaptured,
    ];
}

impl SurfaceEvent {
    pub fn kind(&self) -> SurfaceEventKind {
        match self {
            Self::DidStartLoading => SurfaceEventKind::DidStartLoading,
            Self::DidStopLoading => SurfaceEventKind::DidStopLoading,
            Self::DidNavigate { .. } => SurfaceEventKind::DidNavigate,
            Self::TitleChanged { .. } => SurfaceEventKind::TitleChanged,
            Self::WillNavigate { .. } => SurfaceEventKind::WillNavigate,
            Self::NewWindowRequested { .. } => SurfaceEventKind::NewWindowRequested,
            Self::ContextMenu { .. } => SurfaceEventKind::ContextMenu,
            Self::RenderProcessGone { .. } => SurfaceEventKind::RenderProcessGone,
            Self::DidFailLoad { .. } => SurfaceEventKind::DidFailLoad,
            Self::HttpResponse { .. } => SurfaceEventKind::HttpResponse,
            Self::ThemeColor { .. } => SurfaceEventKind::ThemeColor,
            Self::EnterFullscreen => SurfaceEventKind::EnterFullscreen,
            Self::LeaveFullscreen => SurfaceEventKind::LeaveFullscreen,
            Self::PreviewCaptured { .. } => SurfaceEventKind::PreviewCaptured,
        }
    }
}

/// Everything that reaches the orchestration loop from a surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// A native lifecycle event observed by the engine.
    Surface { tab_id: TabId, event: SurfaceEvent },
    /// A raw IPC message posted by page script. Not yet authenticated.
    Ipc { sender: Sender, body: String },
}

/// Shared sink that engine callbacks push into and the event loop drains.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    inner: Arc<Mutex<Vec<Inbound>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, item: Inbound) {
        match self.inner.lock() {
            Ok(mut items) => items.push(item),
            Err(_) => warn!("event queue poisoned, dropping inbound event"),
        }
    }

    pub fn push_surface(&self, tab_id: TabId, event: SurfaceEvent) {
        self.push(Inbound::Surface { tab_id, event });
    }

    /// Drain all pending events in arrival order.
    pub fn drain(&self) -> Vec<Inbound> {
        match self.inner.lock() {
            Ok(mut items) => std::mem::take(&mut *items),
            Err(_) => Vec::new(),
        }
    }
}
