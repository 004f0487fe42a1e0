//! `ApplicationHandler` implementation for the winit event loop.

use handset_common::Size;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::HandsetApp;
use super::host::full_window_bounds;

impl ApplicationHandler for HandsetApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if !self.initialize_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                self.shutdown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.handle_resize(size);
                }
            }

            WindowEvent::Focused(true) => {
                if let Some(ref ui) = self.ui {
                    if let Err(e) = ui.focus() {
                        tracing::debug!("Failed to focus UI surface: {e}");
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.should_exit {
            event_loop.exit();
            return;
        }
        self.poll_and_schedule(event_loop);
    }
}

impl HandsetApp {
    /// Keep the UI surface covering the window and re-layout the tabs.
    fn handle_resize(&mut self, physical: PhysicalSize<u32>) {
        let Some(ref window) = self.window else {
            return;
        };
        let logical: LogicalSize<f64> = physical.to_logical(window.scale_factor());
        let size = Size::new(logical.width, logical.height);

        if let Some(ref ui) = self.ui {
            if let Err(e) = ui.set_bounds(full_window_bounds(size)) {
                tracing::warn!("Failed to resize UI surface: {e}");
            }
        }
        if let Some(ref mut orchestrator) = self.orchestrator {
            orchestrator.handle_resize(size);
        }
    }
}
