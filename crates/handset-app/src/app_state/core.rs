//! HandsetApp struct definition and constructor.

use std::sync::Arc;

use handset_common::{EventBus, UiEvent};
use handset_config::HandsetConfig;
use handset_shell::Orchestrator;
use handset_webview::{EventQueue, UiSurface};
use tokio::sync::broadcast;
use winit::window::Window;

use super::host::WinitHost;

/// Capacity of the UI event bus between polls.
const EVENT_BUS_CAPACITY: usize = 256;

/// Top-level application state.
pub struct HandsetApp {
    pub(super) config: HandsetConfig,
    /// URL from the command line, opened in the first tab.
    pub(super) start_url: Option<String>,

    // Windowing
    pub(super) window: Option<Arc<Window>>,
    pub(super) ui: Option<UiSurface>,

    // Tab orchestration, built once the window exists
    pub(super) orchestrator: Option<Orchestrator<WinitHost>>,

    // Engine callbacks push here; drained every poll
    pub(super) queue: EventQueue,

    pub(super) bus: EventBus,
    pub(super) ui_events: broadcast::Receiver<UiEvent>,

    pub(super) should_exit: bool,
}

impl HandsetApp {
    pub fn new(config: HandsetConfig, start_url: Option<String>) -> Self {
        let bus = EventBus::new(EVENT_BUS_CAPACITY);
        let ui_events = bus.subscribe();
        Self {
            config,
            start_url,
            window: None,
            ui: None,
            orchestrator: None,
            queue: EventQueue::new(),
            bus,
            ui_events,
            should_exit: false,
        }
    }
}
