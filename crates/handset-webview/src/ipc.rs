//! IPC protocol between Rust and the page scripts.
//!
//! Messages flow in both directions:
//! - **UI -> Rust**: the trusted UI calls `window.handset.invoke(kind, payload)`,
//!   which posts a [`CommandEnvelope`] carrying the capability token.
//! - **Content -> Rust**: the content init script posts [`IpcMessage`] reports
//!   (theme color, fullscreen, HTTP status, context menu). They never carry a
//!   token and are never treated as commands.
//! - **Rust -> UI**: `evaluate_script(js_dispatch_message(..))` invokes
//!   listeners registered with `window.handset.on(kind, cb)`.

use handset_common::CapabilityToken;
use serde::{Deserialize, Serialize};

use crate::events::SurfaceEvent;

/// A typed IPC message from page script to Rust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcMessage {
    pub kind: String,
    #[serde(default = "IpcPayload::none")]
    pub payload: IpcPayload,
}

/// Payload of an IPC message: plain string or structured JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IpcPayload {
    Text(String),
    Json(serde_json::Value),
    None,
}

impl IpcPayload {
    fn none() -> Self {
        Self::None
    }

    fn field(&self, key: &str) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => value.get(key),
            _ => None,
        }
    }
}

impl IpcMessage {
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    pub fn text(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Text(text.into()),
        }
    }

    pub fn json(kind: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            kind: kind.into(),
            payload: IpcPayload::Json(value),
        }
    }

    /// Interpret a report from a content page as a surface event.
    ///
    /// Returns `None` for unknown kinds or malformed payloads.
    pub fn into_content_report(self) -> Option<SurfaceEvent> {
        match self.kind.as_str() {
            "theme-color" => {
                let color = match &self.payload {
                    IpcPayload::Text(s) => s.clone(),
                    other => other.field("color")?.as_str()?.to_string(),
                };
                Some(SurfaceEvent::ThemeColor { color })
            }
            "enter-fullscreen" => Some(SurfaceEvent::EnterFullscreen),
            "leave-fullscreen" => Some(SurfaceEvent::LeaveFullscreen),
            "http-status" => {
                let status = u16::try_from(self.payload.field("status")?.as_u64()?).ok()?;
                let url = self.payload.field("url")?.as_str()?.to_string();
                Some(SurfaceEvent::HttpResponse {
                    status,
                    url,
                    main_frame: true,
                })
            }
            "context-menu" => {
                let x = self.payload.field("x")?.as_f64()?;
                let y = self.payload.field("y")?.as_f64()?;
                Some(SurfaceEvent::ContextMenu { x, y })
            }
            _ => None,
        }
    }
}

/// Kinds a content page may report. Anything else from content is dropped.
pub const CONTENT_REPORT_KINDS: &[&str] = &[
    "theme-color",
    "enter-fullscreen",
    "leave-fullscreen",
    "http-status",
    "context-menu",
];

/// A privileged command posted by the trusted UI surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    /// Correlation id for the reply. Fire-and-forget commands omit it.
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub token: Option<String>,
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl CommandEnvelope {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Bridge script for the trusted UI surface.
///
/// The token is captured in a closure and never exposed on `window`.
pub fn ui_init_script(token: &CapabilityToken) -> String {
    let token_json =
        serde_json::to_string(token.as_str()).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"
(function() {{
    var token = {token_json};
    var nextId = 1;
    var pending = {{}};
    var listeners = {{}};
    function post(msg) {{
        window.ipc.postMessage(JSON.stringify(msg));
    }}
    var bridge = {{
        send: function(kind, payload) {{
            post({{ token: token, kind: kind, payload: payload === undefined ? null : payload }});
        }},
        invoke: function(kind, payload) {{
            var id = nextId++;
            return new Promise(function(resolve, reject) {{
                pending[id] = {{ resolve: resolve, reject: reject }};
                post({{ id: id, token: token, kind: kind, payload: payload === undefined ? null : payload }});
            }});
        }},
        on: function(kind, callback) {{
            (listeners[kind] = listeners[kind] || []).push(callback);
        }},
        _dispatch: function(kind, payload) {{
            if (kind === 'command-reply' && payload && pending[payload.id]) {{
                var p = pending[payload.id];
                delete pending[payload.id];
                if (payload.ok) {{ p.resolve(payload.result); }} else {{ p.reject(new Error(payload.error || 'command failed')); }}
                return;
            }}
            (listeners[kind] || []).forEach(function(cb) {{
                try {{ cb(payload); }} catch (e) {{ console.error(e); }}
            }});
        }}
    }};
    Object.defineProperty(window, 'handset', {{ value: Object.freeze(bridge), writable: false, configurable: false }});
}})();
"#
    )
}

/// Report script injected into every content page.
pub const CONTENT_INIT_SCRIPT: &str = r#"
(function() {
    if (window.__handsetReports) { return; }
    window.__handsetReports = true;
    var isTop = window.top === window;
    function report(kind, payload) {
        try {
            window.ipc.postMessage(JSON.stringify({ kind: kind, payload: payload === undefined ? null : payload }));
        } catch (e) {}
    }
    if (!isTop) { return; }

    var lastColor = null;
    function themeColor() {
        var meta = document.querySelector('meta[name="theme-color"]');
        if (meta && meta.content) { return meta.content.trim(); }
        if (document.body) {
            var bg = getComputedStyle(document.body).backgroundColor;
            if (bg && bg !== 'transparent' && bg !== 'rgba(0, 0, 0, 0)') { return bg; }
        }
        return null;
    }
    function reportColor() {
        var color = themeColor();
        if (color && color !== lastColor) {
            lastColor = color;
            report('theme-color', { color: color });
        }
    }

    function reportStatus() {
        var entries = performance.getEntriesByType ? performance.getEntriesByType('navigation') : [];
        var nav = entries && entries[0];
        if (nav && typeof nav.responseStatus === 'number' && nav.responseStatus > 0) {
            report('http-status', { status: nav.responseStatus, url: location.href });
        }
    }

    function onFullscreen() {
        var el = document.fullscreenElement || document.webkitFullscreenElement;
        report(el ? 'enter-fullscreen' : 'leave-fullscreen');
    }
    document.addEventListener('fullscreenchange', onFullscreen);
    document.addEventListener('webkitfullscreenchange', onFullscreen);

    document.addEventListener('contextmenu', function(e) {
        e.preventDefault();
        report('context-menu', { x: e.clientX, y: e.clientY });
    });

    document.addEventListener('DOMContentLoaded', function() {
        reportStatus();
        reportColor();
        if (window.MutationObserver && document.head) {
            new MutationObserver(reportColor).observe(document.head, {
                childList: true, subtree: true, attributes: true, attributeFilter: ['content']
            });
        }
    });
    window.addEventListener('load', reportColor);
})();
"#;

/// Ask the page to leave element fullscreen.
pub const EXIT_FULLSCREEN_SCRIPT: &str = r#"
(function() {
    if (document.fullscreenElement && document.exitFullscreen) { document.exitFullscreen(); }
    else if (document.webkitFullscreenElement && document.webkitExitFullscreen) { document.webkitExitFullscreen(); }
})();
"#;

/// Script that invokes the UI listeners registered for `kind`.
pub fn js_dispatch_message(kind: &str, payload: &serde_json::Value) -> String {
    let payload_json = serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string());
    format!(
        "window.handset && window.handset._dispatch({}, {});",
        serde_json::to_string(kind).unwrap_or_else(|_| "\"unknown\"".to_string()),
        payload_json,
    )
}
