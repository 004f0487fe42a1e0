//! Active-surface rectangle inside the device frame.

use handset_common::{Bounds, Orientation, Size};

use crate::metrics::FrameMetrics;

/// Per-axis insets before rounding.
struct Insets {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl FrameMetrics {
    /// Compute the rectangle owned by the active content surface.
    ///
    /// The status bar sits on the top edge in portrait and the leading
    /// (left) edge in landscape. Fullscreen drops it and substitutes the
    /// smaller rounded-corner gap on the same edges (both ends).
    pub fn surface_bounds(&self, window: Size, orientation: Orientation, fullscreen: bool) -> Bounds {
        let design = self.window_dimensions(orientation);
        let sx = if design.width > 0.0 { window.width / design.width } else { 0.0 };
        let sy = if design.height > 0.0 { window.height / design.height } else { 0.0 };

        let pad_x = self.frame_padding * sx;
        let pad_y = self.frame_padding * sy;
        let top_bar = self.top_bar_height * sy;

        let mut insets = Insets {
            left: pad_x,
            top: top_bar + pad_y,
            right: pad_x,
            bottom: pad_y,
        };

        match (orientation, fullscreen) {
            (Orientation::Portrait, false) => insets.top += self.status_bar_thickness * sy,
            (Orientation::Landscape, false) => insets.left += self.status_bar_thickness * sx,
            (Orientation::Portrait, true) => {
                let gap = self.fullscreen_gap_portrait * sy;
                insets.top += gap;
                insets.bottom += gap;
            }
            (Orientation::Landscape, true) => {
                let gap = self.fullscreen_gap_landscape * sx;
                insets.left += gap;
                insets.right += gap;
            }
        }

        let width = (window.width - insets.left - insets.right).max(0.0);
        let height = (window.height - insets.top - insets.bottom).max(0.0);

        Bounds {
            x: insets.left.round() as i32,
            y: insets.top.round() as i32,
            width: width.round() as i32,
            height: height.round() as i32,
        }
    }
}
