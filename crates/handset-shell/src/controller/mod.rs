//! Window-level orchestration: ties the host window, the tab manager and
//! the IPC gateway together.
//!
//! One [`Orchestrator`] is built at startup and driven by the event loop:
//! inbound surface traffic goes through [`Orchestrator::handle_inbound`],
//! timers through [`Orchestrator::tick`], window resizes through
//! [`Orchestrator::handle_resize`].

mod commands;
mod layout;

#[cfg(test)]
mod tests;

use std::time::Instant;

use handset_common::{EventBus, HandsetError, Orientation, Size, TabId, UiEvent};
use handset_webview::Inbound;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::gateway::{IpcGateway, Routed};
use crate::tabs::TabManager;

/// The native window the frame is drawn in. Sizes are logical pixels.
pub trait HostWindow {
    fn inner_size(&self) -> Size;
    fn set_inner_size(&self, size: Size);
    fn set_min_inner_size(&self, size: Size);
}

pub struct Orchestrator<H: HostWindow> {
    host: H,
    tabs: TabManager,
    gateway: IpcGateway,
    bus: EventBus,
    orientation: Orientation,
}

impl<H: HostWindow> Orchestrator<H> {
    pub fn new(
        host: H,
        tabs: TabManager,
        gateway: IpcGateway,
        bus: EventBus,
        orientation: Orientation,
    ) -> Self {
        Self {
            host,
            tabs,
            gateway,
            bus,
            orientation,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabManager {
        &mut self.tabs
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Size the window for the current orientation and open the first tab.
    ///
    /// A start url the gate refuses falls back to the blank page.
    pub fn start(&mut self, initial_url: Option<&str>) -> Result<TabId, HandsetError> {
        self.host
            .set_min_inner_size(handset_layout::min_window_size(self.orientation));
        self.relayout();

        let id = match self.tabs.create_tab(initial_url) {
            Ok(id) => id,
            Err(e) => {
                warn!(url = ?initial_url, error = %e, "start url rejected, opening blank page");
                self.tabs.create_tab(None)?
            }
        };
        self.tabs.switch_to_tab(id)?;
        info!(tab_id = %id, orientation = ?self.orientation, "orchestrator started");
        Ok(id)
    }

    /// Process one queued item from a surface.
    pub fn handle_inbound(&mut self, inbound: Inbound, now: Instant) {
        match inbound {
            Inbound::Surface { tab_id, event } => self.tabs.handle_event(tab_id, event, now),
            Inbound::Ipc { sender, body } => match self.gateway.route(sender, &body) {
                Routed::Command { id, command } => {
                    let kind = command.kind();
                    let result = self.execute(command);
                    if let Err(e) = &result {
                        warn!(kind, error = %e, "command failed");
                    }
                    if let Some(id) = id {
                        self.reply(id, result);
                    }
                }
                Routed::Report { tab_id, event } => self.tabs.handle_event(tab_id, event, now),
                Routed::Rejected { id, error } => {
                    if let Some(id) = id {
                        self.reply(id, Err(error));
                    }
                }
                Routed::Ignored => {}
            },
        }

        if self.tabs.take_relayout_request() {
            self.relayout();
            self.force_relayout();
        }
    }

    fn reply(&self, id: u64, result: Result<Value, HandsetError>) {
        let event = match result {
            Ok(result) => UiEvent::CommandReply {
                id,
                ok: true,
                result,
                error: None,
            },
            Err(e) => UiEvent::CommandReply {
                id,
                ok: false,
                result: Value::Null,
                error: Some(e.to_string()),
            },
        };
        self.bus.publish(event);
    }

    pub fn tick(&mut self, now: Instant) {
        self.tabs.tick(now);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.tabs.next_deadline()
    }

    pub fn shutdown(&mut self) {
        debug!(tabs = self.tabs.len(), "orchestrator shutting down");
        self.tabs.shutdown();
    }
}
