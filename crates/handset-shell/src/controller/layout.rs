use handset_common::{Orientation, Size, UiEvent};
use handset_layout::{clamp_window_size, min_window_size, surface_bounds, window_dimensions};
use tracing::{debug, info};

use super::{HostWindow, Orchestrator};

impl<H: HostWindow> Orchestrator<H> {
    /// Recompute surface rectangles from the current window size.
    pub fn relayout(&mut self) {
        let size = clamp_window_size(self.host.inner_size(), self.orientation);
        self.apply_layout(size);
    }

    fn apply_layout(&mut self, size: Size) {
        let normal = surface_bounds(size, self.orientation, false);
        let fullscreen = surface_bounds(size, self.orientation, true);
        debug!(?size, ?normal, ?fullscreen, "layout applied");
        self.tabs.set_layout(normal, fullscreen);
    }

    /// Grow the window by one pixel and put it back.
    ///
    /// Some platform webviews keep painting at their old size after their
    /// bounds change while the window does not; a real resize makes them
    /// pick up the new geometry.
    pub fn force_relayout(&mut self) {
        let size = self.host.inner_size();
        self.host
            .set_inner_size(Size::new(size.width + 1.0, size.height));
        self.host.set_inner_size(size);
    }

    /// Flip between portrait and landscape and resize the frame to match.
    pub fn toggle_orientation(&mut self) -> Orientation {
        self.orientation = self.orientation.toggled();
        let size = window_dimensions(self.orientation);
        self.host.set_min_inner_size(min_window_size(self.orientation));
        self.host.set_inner_size(size);
        self.apply_layout(size);
        info!(orientation = ?self.orientation, "orientation changed");

        self.bus.publish(UiEvent::OrientationChanged {
            orientation: self.orientation,
        });
        self.orientation
    }

    /// The window was resized by the user or the platform.
    pub fn handle_resize(&mut self, size: Size) {
        let clamped = clamp_window_size(size, self.orientation);
        if clamped != size {
            debug!(?size, ?clamped, "window below minimum, clamping");
            self.host.set_inner_size(clamped);
        }
        self.apply_layout(clamped);
    }
}
