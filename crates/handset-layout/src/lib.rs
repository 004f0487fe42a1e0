//! Device-frame geometry.
//!
//! Pure functions: given the window size, orientation and fullscreen flag,
//! compute where the active content surface goes. No I/O and no state
//! beyond the design constants in [`FrameMetrics`].

mod calculation;
mod metrics;
mod window;

pub use metrics::FrameMetrics;

use handset_common::{Bounds, Orientation, Size};

/// Outer window size for `orientation` using the default frame.
pub fn window_dimensions(orientation: Orientation) -> Size {
    FrameMetrics::DEFAULT.window_dimensions(orientation)
}

/// Active surface rectangle for the default frame.
///
/// Callers clamp the window to [`min_window_size`] first; smaller windows
/// still never produce negative dimensions.
pub fn surface_bounds(window: Size, orientation: Orientation, fullscreen: bool) -> Bounds {
    FrameMetrics::DEFAULT.surface_bounds(window, orientation, fullscreen)
}

/// Documented minimum window size for `orientation`.
pub fn min_window_size(orientation: Orientation) -> Size {
    FrameMetrics::DEFAULT.min_window_size(orientation)
}

/// `size` raised to at least the minimum for `orientation`.
pub fn clamp_window_size(size: Size, orientation: Orientation) -> Size {
    FrameMetrics::DEFAULT.clamp_window_size(size, orientation)
}
