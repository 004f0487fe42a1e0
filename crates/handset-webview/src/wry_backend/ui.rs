use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Arc;

use handset_common::{Bounds, SurfaceError, UiEvent};
use tracing::{debug, warn};
use wry::http::{Response, StatusCode};
use wry::raw_window_handle::HasWindowHandle;
use wry::{WebContext, WebView, WebViewBuilder};

use crate::content::{ContentProvider, UI_ENTRY_URL, UI_SCHEME};
use crate::events::{EventQueue, Sender};
use crate::ipc::{js_dispatch_message, ui_init_script};
use crate::security::SecurityGate;

use super::{backend_err, handlers, to_rect};

/// Origins the trusted UI may navigate to. WebView2 rewrites custom schemes
/// to `http://<scheme>.localhost`.
const UI_NAV_PREFIXES: &[&str] = &["handset://", "http://handset.localhost", "about:blank"];

fn is_ui_navigation_allowed(url: &str) -> bool {
    UI_NAV_PREFIXES.iter().any(|prefix| url.starts_with(prefix))
}

/// The trusted UI surface: device frame, tab strip and controls.
///
/// It is the only surface that receives the capability token.
pub struct UiSurface {
    webview: WebView,
    // Must outlive the webview on some platforms.
    _context: WebContext,
}

impl UiSurface {
    pub fn new<W: HasWindowHandle>(
        window: &W,
        bounds: Bounds,
        partition_dir: PathBuf,
        provider: ContentProvider,
        queue: EventQueue,
        gate: &SecurityGate,
    ) -> Result<Self, SurfaceError> {
        let mut context = WebContext::new(Some(partition_dir));
        let provider = Arc::new(provider);
        let init_script = ui_init_script(gate.token());
        let devtools = gate.dev_mode() || cfg!(debug_assertions);

        let builder = WebViewBuilder::with_web_context(&mut context)
            .with_bounds(to_rect(bounds))
            .with_transparent(true)
            .with_devtools(devtools)
            .with_initialization_script(&init_script)
            .with_navigation_handler(|url| {
                let allowed = is_ui_navigation_allowed(&url);
                if !allowed {
                    warn!(url = %url, "UI surface navigation blocked");
                }
                allowed
            })
            .with_new_window_req_handler(|url| {
                warn!(url = %url, "UI surface new window denied");
                false
            })
            .with_custom_protocol(UI_SCHEME.to_string(), move |_id, request| {
                let path = request.uri().path().to_string();
                match provider.resolve(&path) {
                    Some((mime, data)) => Response::builder()
                        .status(StatusCode::OK)
                        .header("Content-Type", mime)
                        .body(Cow::Owned(data))
                        .unwrap_or_else(|_| Response::new(Cow::Borrowed(&[][..]))),
                    None => {
                        warn!(path = %path, "UI asset not found");
                        let mut response = Response::new(Cow::Borrowed(&b"Not Found"[..]));
                        *response.status_mut() = StatusCode::NOT_FOUND;
                        response
                    }
                }
            });

        let builder = handlers::attach_ipc_handler(builder, queue, Sender::Ui);

        let webview = builder
            .with_url(UI_ENTRY_URL)
            .build_as_child(window)
            .map_err(backend_err)?;

        debug!("UI surface created");
        Ok(Self {
            webview,
            _context: context,
        })
    }

    /// Deliver an event to the UI's registered listeners.
    pub fn dispatch(&self, event: &UiEvent) -> Result<(), SurfaceError> {
        let (kind, payload) = event.to_message();
        let script = js_dispatch_message(&kind, &payload);
        self.webview.evaluate_script(&script).map_err(backend_err)
    }

    pub fn set_bounds(&self, bounds: Bounds) -> Result<(), SurfaceError> {
        self.webview.set_bounds(to_rect(bounds)).map_err(backend_err)
    }

    pub fn focus(&self) -> Result<(), SurfaceError> {
        self.webview.focus().map_err(backend_err)
    }

    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }
}
