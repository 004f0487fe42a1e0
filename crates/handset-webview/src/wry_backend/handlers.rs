use std::sync::Arc;

use handset_common::TabId;
use tracing::{debug, warn};
use wry::WebViewBuilder;

use crate::events::{EventQueue, Inbound, PageLoadState, Sender, SurfaceEvent};
use crate::security::SecurityGate;

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

/// Forward page script messages. Bodies that are not JSON are dropped here.
pub(super) fn attach_ipc_handler(
    builder: WebViewBuilder<'_>,
    queue: EventQueue,
    sender: Sender,
) -> WebViewBuilder<'_> {
    builder.with_ipc_handler(move |request| {
        let body = request.body().to_string();

        if serde_json::from_str::<serde_json::Value>(&body).is_err() {
            warn!(%sender, body_len = body.len(), "IPC message rejected: invalid JSON");
            return;
        }

        debug!(%sender, body_len = body.len(), "IPC message from page");
        queue.push(Inbound::Ipc { sender, body });
    })
}

/// Started loads also report the destination URL as the committed one, so
/// that reports from the new document always follow its navigation.
pub(super) fn attach_page_load_handler(
    builder: WebViewBuilder<'_>,
    queue: EventQueue,
    tab_id: TabId,
) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(%tab_id, ?state, url = %url, "page load");
        match state {
            PageLoadState::Started => {
                queue.push_surface(tab_id, SurfaceEvent::DidStartLoading);
                queue.push_surface(tab_id, SurfaceEvent::DidNavigate { url });
            }
            PageLoadState::Finished => {
                queue.push_surface(tab_id, SurfaceEvent::DidStopLoading);
            }
        }
    })
}

pub(super) fn attach_title_handler(
    builder: WebViewBuilder<'_>,
    queue: EventQueue,
    tab_id: TabId,
) -> WebViewBuilder<'_> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(%tab_id, title = %title, "title changed");
        queue.push_surface(tab_id, SurfaceEvent::TitleChanged { title });
    })
}

/// Veto disallowed navigations synchronously. Every attempt is still
/// reported so the tab manager can tell the UI about blocked ones.
pub(super) fn attach_navigation_handler(
    builder: WebViewBuilder<'_>,
    queue: EventQueue,
    tab_id: TabId,
    gate: Arc<SecurityGate>,
) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        let allowed = gate.is_navigation_allowed(&url);
        if allowed {
            debug!(%tab_id, url = %url, "navigation allowed");
        } else {
            warn!(%tab_id, url = %url, "navigation blocked");
        }
        queue.push_surface(tab_id, SurfaceEvent::WillNavigate { url });
        allowed
    })
}

/// New top-level windows are never opened; the request becomes a new tab.
pub(super) fn attach_new_window_handler(
    builder: WebViewBuilder<'_>,
    queue: EventQueue,
    tab_id: TabId,
) -> WebViewBuilder<'_> {
    builder.with_new_window_req_handler(move |url| {
        debug!(%tab_id, url = %url, "new window requested, opening as tab");
        queue.push_surface(tab_id, SurfaceEvent::NewWindowRequested { url });
        false
    })
}
