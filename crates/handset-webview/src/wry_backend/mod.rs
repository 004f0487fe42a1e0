//! `wry` implementation of the content surface capability.
//!
//! Each tab gets a child `WebView` of the host window, built from a shared
//! content `WebContext` whose data directory is separate from the UI
//! surface's. Engine callbacks only push into the [`EventQueue`]; the
//! orchestration loop drains it.

use std::path::PathBuf;
use std::sync::Arc;

use handset_common::{Bounds, SurfaceError};
use tracing::debug;
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebContext, WebViewBuilder};

use crate::events::{EventQueue, Sender};
use crate::ipc::CONTENT_INIT_SCRIPT;
use crate::security::SecurityGate;
use crate::surface::{ContentSurface, SurfaceFactory, SurfaceSpec};

mod handlers;
mod surface;
mod ui;

pub use surface::WrySurface;
pub use ui::UiSurface;

pub(crate) fn backend_err(e: wry::Error) -> SurfaceError {
    SurfaceError::Backend(e.to_string())
}

/// Layout bounds are logical pixels.
pub(crate) fn to_rect(bounds: Bounds) -> wry::Rect {
    wry::Rect {
        position: LogicalPosition::new(bounds.x, bounds.y).into(),
        size: LogicalSize::new(bounds.width.max(0) as u32, bounds.height.max(0) as u32).into(),
    }
}

/// Builds tab surfaces as children of `window`.
pub struct WrySurfaceFactory<W> {
    window: Arc<W>,
    context: WebContext,
    queue: EventQueue,
    gate: Arc<SecurityGate>,
    devtools: bool,
}

impl<W: HasWindowHandle> WrySurfaceFactory<W> {
    /// `partition_dir` holds cookies and storage for every content surface.
    pub fn new(
        window: Arc<W>,
        partition_dir: PathBuf,
        queue: EventQueue,
        gate: Arc<SecurityGate>,
    ) -> Self {
        let devtools = gate.dev_mode() || cfg!(debug_assertions);
        Self {
            window,
            context: WebContext::new(Some(partition_dir)),
            queue,
            gate,
            devtools,
        }
    }
}

impl<W: HasWindowHandle> SurfaceFactory for WrySurfaceFactory<W> {
    fn create(&mut self, spec: SurfaceSpec) -> Result<Box<dyn ContentSurface>, SurfaceError> {
        let tab_id = spec.tab_id;

        let mut builder = WebViewBuilder::with_web_context(&mut self.context)
            .with_bounds(to_rect(spec.bounds))
            .with_visible(spec.visible)
            .with_user_agent(&spec.user_agent)
            .with_devtools(self.devtools)
            .with_clipboard(true)
            .with_autoplay(true)
            .with_focused(false)
            .with_initialization_script(CONTENT_INIT_SCRIPT);

        builder = handlers::attach_ipc_handler(builder, self.queue.clone(), Sender::Tab(tab_id));
        builder = handlers::attach_page_load_handler(builder, self.queue.clone(), tab_id);
        builder = handlers::attach_title_handler(builder, self.queue.clone(), tab_id);
        builder = handlers::attach_navigation_handler(
            builder,
            self.queue.clone(),
            tab_id,
            Arc::clone(&self.gate),
        );
        builder = handlers::attach_new_window_handler(builder, self.queue.clone(), tab_id);

        let webview = builder
            .with_url(&spec.url)
            .build_as_child(self.window.as_ref())
            .map_err(backend_err)?;

        debug!(%tab_id, url = %spec.url, "content surface created");
        Ok(Box::new(WrySurface { webview, tab_id }))
    }
}
