use handset_common::{Bounds, SurfaceError, TabId};
use tracing::debug;
use wry::WebView;

use crate::ipc::EXIT_FULLSCREEN_SCRIPT;
use crate::surface::{ContentSurface, EditCommand};

use super::{backend_err, to_rect};

/// A tab's content surface backed by a child `wry::WebView`.
pub struct WrySurface {
    pub(super) webview: WebView,
    pub(super) tab_id: TabId,
}

impl WrySurface {
    fn eval(&self, js: &str) -> Result<(), SurfaceError> {
        self.webview.evaluate_script(js).map_err(backend_err)
    }
}

impl ContentSurface for WrySurface {
    fn load_url(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.webview.load_url(url).map_err(backend_err)
    }

    fn load_html(&mut self, html: &str) -> Result<(), SurfaceError> {
        self.webview.load_html(html).map_err(backend_err)
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.eval("location.reload();")
    }

    fn go_back(&mut self) -> Result<(), SurfaceError> {
        self.eval("history.back();")
    }

    fn go_forward(&mut self) -> Result<(), SurfaceError> {
        self.eval("history.forward();")
    }

    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), SurfaceError> {
        self.webview.set_bounds(to_rect(bounds)).map_err(backend_err)
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
        self.webview.set_visible(visible).map_err(backend_err)
    }

    fn focus(&mut self) -> Result<(), SurfaceError> {
        self.webview.focus().map_err(backend_err)
    }

    /// The engine fixes the user agent when the view is built.
    fn set_user_agent(&mut self, _user_agent: &str) -> Result<(), SurfaceError> {
        Err(SurfaceError::NotSupported("changing the user agent after creation".into()))
    }

    fn capture_preview(&mut self) -> Result<(), SurfaceError> {
        Err(SurfaceError::NotSupported("page snapshots".into()))
    }

    fn exit_fullscreen(&mut self) -> Result<(), SurfaceError> {
        self.eval(EXIT_FULLSCREEN_SCRIPT)?;
        self.eval("window.dispatchEvent(new CustomEvent('fullscreen-exited'));")
    }

    fn edit(&mut self, command: EditCommand) -> Result<(), SurfaceError> {
        self.eval(command.script())
    }

    fn open_devtools(&mut self) -> Result<(), SurfaceError> {
        self.webview.open_devtools();
        Ok(())
    }
}

impl Drop for WrySurface {
    fn drop(&mut self) {
        debug!(tab_id = %self.tab_id, "content surface destroyed");
    }
}
