//! Draining surface traffic, firing timers and forwarding UI events.

use std::time::{Duration, Instant};

use handset_common::events::drain;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::HandsetApp;

/// Engine callbacks do not wake the loop, so it polls at this rate.
const POLL_INTERVAL: Duration = Duration::from_millis(8);

impl HandsetApp {
    /// Run one poll and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if let Some(ref mut orchestrator) = self.orchestrator {
            for inbound in self.queue.drain() {
                orchestrator.handle_inbound(inbound, now);
            }
            orchestrator.tick(now);
        }

        self.forward_ui_events();

        let mut wake = now + POLL_INTERVAL;
        if let Some(deadline) = self.orchestrator.as_ref().and_then(|o| o.next_deadline()) {
            wake = wake.min(deadline);
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake));
    }

    /// Push everything the core emitted since the last poll to the UI.
    fn forward_ui_events(&mut self) {
        let events = drain(&mut self.ui_events);
        let Some(ref ui) = self.ui else {
            return;
        };
        for event in &events {
            if let Err(e) = ui.dispatch(event) {
                tracing::warn!("Failed to dispatch UI event: {e}");
            }
        }
    }
}
