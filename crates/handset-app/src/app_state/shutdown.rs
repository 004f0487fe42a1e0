//! Graceful shutdown: persist state and destroy surfaces.

use super::core::HandsetApp;

impl HandsetApp {
    /// Flush the theme cache, drop every tab, then the UI surface.
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        if let Some(ref mut orchestrator) = self.orchestrator {
            orchestrator.shutdown();
        }
        self.orchestrator = None;
        self.queue.drain();
        self.ui = None;
        self.window = None;
        self.should_exit = true;

        tracing::info!("Graceful shutdown complete");
    }
}
