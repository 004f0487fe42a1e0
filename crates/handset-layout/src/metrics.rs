//! Design-time measurements of the device frame.

use serde::{Deserialize, Serialize};

/// Fixed measurements of the decorative frame at its design size (portrait).
///
/// Every value is in logical pixels at scale 1.0. Actual geometry scales
/// them by `window / design` independently per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameMetrics {
    /// Outer window width in portrait, top bar included.
    pub design_width: f64,
    /// Outer window height in portrait, top bar included.
    pub design_height: f64,
    /// Height of the draggable top bar above the device.
    pub top_bar_height: f64,
    /// Bezel between the window edge and the screen.
    pub frame_padding: f64,
    /// Thickness of the simulated status bar.
    pub status_bar_thickness: f64,
    /// Fullscreen inset on the top and bottom edges in portrait.
    pub fullscreen_gap_portrait: f64,
    /// Fullscreen inset on the left and right edges in landscape.
    pub fullscreen_gap_landscape: f64,
    /// Smallest allowed window, as a fraction of the design size.
    pub min_scale: f64,
}

impl FrameMetrics {
    pub const DEFAULT: Self = Self {
        design_width: 400.0,
        design_height: 860.0,
        top_bar_height: 36.0,
        frame_padding: 14.0,
        status_bar_thickness: 44.0,
        fullscreen_gap_portrait: 28.0,
        fullscreen_gap_landscape: 36.0,
        min_scale: 0.6,
    };
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}
