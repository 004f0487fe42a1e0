//! Authenticated entry point for every message a surface posts.
//!
//! The UI surface sends [`Command`]s wrapped in a token-carrying envelope.
//! Content surfaces may only send the unprivileged reports listed in
//! [`CONTENT_REPORT_KINDS`]; anything else from them is rejected.

mod command;

use std::sync::Arc;

use handset_common::{HandsetError, SecurityError, TabId};
use handset_webview::ipc::CONTENT_REPORT_KINDS;
use handset_webview::{CommandEnvelope, IpcMessage, SecurityGate, Sender, SurfaceEvent};
use tracing::{debug, warn};

pub use command::{Command, COMMAND_KINDS};

/// Outcome of routing one raw IPC body.
#[derive(Debug)]
pub enum Routed {
    /// An authenticated UI command. `id` is set when the UI awaits a reply.
    Command { id: Option<u64>, command: Command },
    /// A content surface reporting on itself.
    Report { tab_id: TabId, event: SurfaceEvent },
    /// Refused. A reply is owed when `id` is set.
    Rejected { id: Option<u64>, error: HandsetError },
    /// Malformed content chatter, dropped.
    Ignored,
}

pub struct IpcGateway {
    gate: Arc<SecurityGate>,
}

impl IpcGateway {
    pub fn new(gate: Arc<SecurityGate>) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &SecurityGate {
        &self.gate
    }

    pub fn route(&self, sender: Sender, body: &str) -> Routed {
        match sender {
            Sender::Ui => self.route_command(body),
            Sender::Tab(tab_id) => self.route_report(tab_id, body),
        }
    }

    fn route_command(&self, body: &str) -> Routed {
        let envelope = match CommandEnvelope::from_json(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(body_len = body.len(), error = %e, "UI command rejected: failed to parse");
                return Routed::Rejected {
                    id: None,
                    error: HandsetError::InvalidCommand(e.to_string()),
                };
            }
        };
        let id = envelope.id;

        if let Err(e) = self
            .gate
            .authenticate(Sender::Ui, envelope.token.as_deref())
        {
            debug!(kind = %envelope.kind, error = %e, "UI command rejected");
            return Routed::Rejected {
                id,
                error: e.into(),
            };
        }

        match Command::parse(&envelope.kind, &envelope.payload) {
            Ok(command) => {
                debug!(kind = %envelope.kind, id = ?id, "UI command accepted");
                Routed::Command { id, command }
            }
            Err(error) => {
                warn!(kind = %envelope.kind, error = %error, "UI command rejected");
                Routed::Rejected { id, error }
            }
        }
    }

    fn route_report(&self, tab_id: TabId, body: &str) -> Routed {
        let Some(message) = IpcMessage::from_json(body) else {
            warn!(tab_id = %tab_id, body_len = body.len(), "content report dropped: failed to parse");
            return Routed::Ignored;
        };

        if !CONTENT_REPORT_KINDS.contains(&message.kind.as_str()) {
            let sender = Sender::Tab(tab_id);
            warn!(%sender, kind = %message.kind, "privileged message from content surface rejected");
            return Routed::Rejected {
                id: None,
                error: SecurityError::ContentOrigin(message.kind).into(),
            };
        }

        let kind = message.kind.clone();
        match message.into_content_report() {
            Some(event) => Routed::Report { tab_id, event },
            None => {
                warn!(tab_id = %tab_id, kind = %kind, "content report dropped: bad payload");
                Routed::Ignored
            }
        }
    }
}
