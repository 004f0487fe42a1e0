//! The winit window as the orchestrator's host.

use std::sync::Arc;

use handset_common::{Bounds, Size};
use handset_shell::HostWindow;
use winit::dpi::LogicalSize;
use winit::window::Window;

pub struct WinitHost {
    window: Arc<Window>,
}

impl WinitHost {
    pub fn new(window: Arc<Window>) -> Self {
        Self { window }
    }
}

impl HostWindow for WinitHost {
    fn inner_size(&self) -> Size {
        let logical: LogicalSize<f64> = self
            .window
            .inner_size()
            .to_logical(self.window.scale_factor());
        Size::new(logical.width, logical.height)
    }

    fn set_inner_size(&self, size: Size) {
        // The platform may apply the size later and report it via `Resized`.
        let _ = self
            .window
            .request_inner_size(LogicalSize::new(size.width, size.height));
    }

    fn set_min_inner_size(&self, size: Size) {
        self.window
            .set_min_inner_size(Some(LogicalSize::new(size.width, size.height)));
    }
}

/// The UI surface covers the whole window; the frame is drawn inside it.
pub fn full_window_bounds(size: Size) -> Bounds {
    Bounds::new(0, 0, size.width.round() as i32, size.height.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_window_bounds_rounds_logical_size() {
        assert_eq!(
            full_window_bounds(Size::new(400.4, 859.6)),
            Bounds::new(0, 0, 400, 860)
        );
    }
}
