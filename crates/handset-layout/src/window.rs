//! Outer window sizing for each orientation.

use handset_common::{Orientation, Size};

use crate::metrics::FrameMetrics;

impl FrameMetrics {
    /// Outer window size of the device frame. Landscape swaps the base values.
    pub fn window_dimensions(&self, orientation: Orientation) -> Size {
        let portrait = Size::new(self.design_width, self.design_height);
        match orientation {
            Orientation::Portrait => portrait,
            Orientation::Landscape => portrait.swapped(),
        }
    }

    /// Smallest window size callers must clamp resizes to.
    pub fn min_window_size(&self, orientation: Orientation) -> Size {
        let full = self.window_dimensions(orientation);
        Size::new(
            (full.width * self.min_scale).round(),
            (full.height * self.min_scale).round(),
        )
    }

    /// Clamp a requested window size up to the documented minimum.
    pub fn clamp_window_size(&self, size: Size, orientation: Orientation) -> Size {
        let min = self.min_window_size(orientation);
        Size::new(size.width.max(min.width), size.height.max(min.height))
    }
}
