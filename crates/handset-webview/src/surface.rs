//! The content surface capability.
//!
//! A surface loads URLs, navigates, runs a handful of fixed page commands and
//! reports lifecycle events through the shared [`EventQueue`]. Every call is
//! fire-and-forget: nothing here waits on the page. Dropping a surface tears
//! down the underlying engine view.
//!
//! [`EventQueue`]: crate::events::EventQueue

use handset_common::{Bounds, SurfaceError, TabId};

/// Clipboard and selection commands from the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditCommand {
    Copy,
    Paste,
    SelectAll,
}

impl EditCommand {
    pub(crate) fn script(self) -> &'static str {
        match self {
            Self::Copy => "document.execCommand('copy');",
            Self::Paste => "document.execCommand('paste');",
            Self::SelectAll => "document.execCommand('selectAll');",
        }
    }
}

/// Everything needed to build a surface for a tab.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceSpec {
    pub tab_id: TabId,
    /// First document to load (already resolved to a URL).
    pub url: String,
    pub user_agent: String,
    pub bounds: Bounds,
    /// New surfaces start detached; the tab manager attaches on switch.
    pub visible: bool,
}

/// Implementations veto navigations the security gate refuses before they
/// start, and report every attempt as `SurfaceEvent::WillNavigate`.
pub trait ContentSurface {
    fn load_url(&mut self, url: &str) -> Result<(), SurfaceError>;

    /// Render an HTML document directly. Fallback when a generated page
    /// cannot be written to disk.
    fn load_html(&mut self, html: &str) -> Result<(), SurfaceError>;

    fn reload(&mut self) -> Result<(), SurfaceError>;

    fn go_back(&mut self) -> Result<(), SurfaceError>;

    fn go_forward(&mut self) -> Result<(), SurfaceError>;

    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), SurfaceError>;

    /// Attach (show) or detach (hide) the surface in the host window.
    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError>;

    fn focus(&mut self) -> Result<(), SurfaceError>;

    fn set_user_agent(&mut self, user_agent: &str) -> Result<(), SurfaceError>;

    /// Start an asynchronous snapshot. The result arrives later as
    /// `SurfaceEvent::PreviewCaptured`; it may never arrive.
    fn capture_preview(&mut self) -> Result<(), SurfaceError>;

    /// Ask the document to leave fullscreen and tell it why.
    fn exit_fullscreen(&mut self) -> Result<(), SurfaceError>;

    fn edit(&mut self, command: EditCommand) -> Result<(), SurfaceError>;

    fn open_devtools(&mut self) -> Result<(), SurfaceError>;
}

/// Builds surfaces for new tabs, each with the isolated content partition.
pub trait SurfaceFactory {
    fn create(&mut self, spec: SurfaceSpec) -> Result<Box<dyn ContentSurface>, SurfaceError>;
}
