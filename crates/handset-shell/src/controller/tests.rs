use std::sync::Arc;
use std::time::{Duration, Instant};

use handset_common::{Bounds, Orientation, Size, TabId, UiEvent};
use handset_webview::{Inbound, SecurityGate, Sender, SurfaceEvent};
use serde_json::{json, Value};
use tokio::sync::broadcast;

use super::Orchestrator;
use crate::gateway::{Command, IpcGateway};
use crate::testing::{Call, CallLog, Harness, MockHost};

struct Fixture {
    orch: Orchestrator<MockHost>,
    host: MockHost,
    log: CallLog,
    events: broadcast::Receiver<UiEvent>,
    gate: Arc<SecurityGate>,
}

impl Fixture {
    fn new() -> Self {
        let Harness {
            tabs,
            log,
            events,
            gate,
            bus,
            ..
        } = Harness::new();
        let host = MockHost::default();
        let gateway = IpcGateway::new(Arc::clone(&gate));
        let orch = Orchestrator::new(host.clone(), tabs, gateway, bus, Orientation::Portrait);
        Self {
            orch,
            host,
            log,
            events,
            gate,
        }
    }

    fn started() -> (Self, TabId) {
        let mut f = Self::new();
        let id = f.orch.start(None).unwrap();
        f.drain();
        f.log.borrow_mut().clear();
        f.host.resizes.borrow_mut().clear();
        (f, id)
    }

    fn drain(&mut self) -> Vec<UiEvent> {
        handset_common::events::drain(&mut self.events)
    }

    fn calls(&self, id: TabId) -> Vec<Call> {
        self.log
            .borrow()
            .iter()
            .filter(|(tab, _)| *tab == id)
            .map(|(_, call)| call.clone())
            .collect()
    }

    fn command(&mut self, id: Option<u64>, kind: &str, payload: Value) {
        let body = json!({
            "id": id,
            "token": self.gate.token().as_str(),
            "kind": kind,
            "payload": payload,
        })
        .to_string();
        self.orch.handle_inbound(
            Inbound::Ipc {
                sender: Sender::Ui,
                body,
            },
            Instant::now(),
        );
    }

    fn replies(&mut self) -> Vec<(u64, bool, Value, Option<String>)> {
        self.drain()
            .into_iter()
            .filter_map(|e| match e {
                UiEvent::CommandReply {
                    id,
                    ok,
                    result,
                    error,
                } => Some((id, ok, result, error)),
                _ => None,
            })
            .collect()
    }
}

#[test]
fn start_opens_one_active_tab_with_design_layout() {
    let mut f = Fixture::new();
    let id = f.orch.start(None).unwrap();

    assert_eq!(f.orch.tabs().len(), 1);
    assert_eq!(f.orch.tabs().active_id(), Some(id));
    assert_eq!(*f.host.min.borrow(), Some(Size::new(240.0, 516.0)));
    assert_eq!(f.orch.tabs().bounds(), Bounds::new(14, 94, 372, 752));
    assert!(f.calls(id).contains(&Call::SetVisible(true)));
    assert!(f
        .drain()
        .iter()
        .any(|e| matches!(e, UiEvent::TabChanged { tab_id, .. } if *tab_id == id)));
}

#[test]
fn rejected_start_url_falls_back_to_blank() {
    let mut f = Fixture::new();
    let id = f.orch.start(Some("javascript:void(0)")).unwrap();
    assert_eq!(f.orch.tabs().tab(id).unwrap().url(), "/");
}

#[test]
fn toggle_orientation_resizes_and_relayouts() {
    let (mut f, id) = Fixture::started();

    let orientation = f.orch.toggle_orientation();
    assert_eq!(orientation, Orientation::Landscape);
    assert_eq!(*f.host.resizes.borrow(), vec![Size::new(860.0, 400.0)]);
    assert_eq!(*f.host.min.borrow(), Some(Size::new(516.0, 240.0)));

    let landscape = Bounds::new(58, 50, 788, 336);
    assert_eq!(f.orch.tabs().bounds(), landscape);
    assert_eq!(f.calls(id), vec![Call::SetBounds(landscape)]);
    assert_eq!(
        f.drain(),
        vec![UiEvent::OrientationChanged {
            orientation: Orientation::Landscape
        }]
    );

    assert_eq!(f.orch.toggle_orientation(), Orientation::Portrait);
    assert_eq!(f.orch.tabs().bounds(), Bounds::new(14, 94, 372, 752));
}

#[test]
fn resize_below_minimum_is_clamped() {
    let (mut f, _) = Fixture::started();
    f.orch.handle_resize(Size::new(100.0, 300.0));
    assert_eq!(*f.host.resizes.borrow(), vec![Size::new(240.0, 516.0)]);
    let b = f.orch.tabs().bounds();
    assert!(b.width > 0 && b.height > 0);
}

#[test]
fn resize_above_minimum_scales_bounds() {
    let (mut f, _) = Fixture::started();
    f.orch.handle_resize(Size::new(800.0, 1720.0));
    assert!(f.host.resizes.borrow().is_empty());
    assert_eq!(f.orch.tabs().bounds(), Bounds::new(28, 188, 744, 1504));
}

#[test]
fn force_relayout_grows_then_restores() {
    let (mut f, _) = Fixture::started();
    f.orch.force_relayout();
    assert_eq!(
        *f.host.resizes.borrow(),
        vec![Size::new(401.0, 860.0), Size::new(400.0, 860.0)]
    );
}

#[test]
fn fullscreen_report_kicks_layout() {
    let (mut f, id) = Fixture::started();
    f.orch.handle_inbound(
        Inbound::Ipc {
            sender: Sender::Tab(id),
            body: json!({"kind": "enter-fullscreen"}).to_string(),
        },
        Instant::now(),
    );

    assert_eq!(
        f.orch.tabs().tab(id).unwrap().state(),
        crate::tabs::TabState::Fullscreen
    );
    assert_eq!(
        *f.host.resizes.borrow(),
        vec![Size::new(401.0, 860.0), Size::new(400.0, 860.0)]
    );
    // The relayout keeps the tab on its fullscreen rectangle.
    assert_eq!(
        f.calls(id).last(),
        Some(&Call::SetBounds(Bounds::new(14, 78, 372, 740)))
    );

    // No further kick without a new transition.
    f.host.resizes.borrow_mut().clear();
    f.orch
        .handle_inbound(Inbound::Surface { tab_id: id, event: SurfaceEvent::DidStopLoading }, Instant::now());
    assert!(f.host.resizes.borrow().is_empty());
}

#[test]
fn create_command_replies_with_new_id() {
    let (mut f, first) = Fixture::started();
    f.command(Some(1), "create", json!({"url": "example.com"}));

    let replies = f.replies();
    assert_eq!(replies.len(), 1);
    let (id, ok, result, error) = &replies[0];
    assert_eq!(*id, 1);
    assert!(ok);
    assert!(error.is_none());
    let new_id = result["id"].as_u64().unwrap();
    assert_ne!(new_id, u64::from(first.0));
    assert_eq!(f.orch.tabs().len(), 2);
    // Creation alone does not change the active tab.
    assert_eq!(f.orch.tabs().active_id(), Some(first));
}

#[test]
fn get_all_lists_tabs_and_active_id() {
    let (mut f, first) = Fixture::started();
    f.command(Some(2), "get-all", Value::Null);
    let (_, ok, result, _) = f.replies().remove(0);
    assert!(ok);
    assert_eq!(result["activeId"], json!(first.0));
    assert_eq!(result["tabs"].as_array().unwrap().len(), 1);
    assert_eq!(result["tabs"][0]["url"], json!("/"));
}

#[test]
fn failing_command_replies_with_error() {
    let (mut f, _) = Fixture::started();
    f.command(Some(3), "switch", json!({"id": 999}));
    let (id, ok, result, error) = f.replies().remove(0);
    assert_eq!(id, 3);
    assert!(!ok);
    assert_eq!(result, Value::Null);
    assert_eq!(error.as_deref(), Some("no such tab: 999"));
}

#[test]
fn command_without_id_gets_no_reply() {
    let (mut f, _) = Fixture::started();
    f.command(None, "create", Value::Null);
    assert!(f.replies().is_empty());
    assert_eq!(f.orch.tabs().len(), 2);
}

#[test]
fn forged_token_is_refused() {
    let (mut f, _) = Fixture::started();
    let body = json!({"id": 4, "token": "nope", "kind": "close-all"}).to_string();
    f.orch.handle_inbound(
        Inbound::Ipc {
            sender: Sender::Ui,
            body,
        },
        Instant::now(),
    );
    let (id, ok, _, _) = f.replies().remove(0);
    assert_eq!(id, 4);
    assert!(!ok);
    assert_eq!(f.orch.tabs().len(), 1);
}

#[test]
fn content_surface_cannot_issue_commands() {
    let (mut f, id) = Fixture::started();
    let body = json!({
        "id": 5,
        "token": f.gate.token().as_str(),
        "kind": "create",
    })
    .to_string();
    f.orch.handle_inbound(
        Inbound::Ipc {
            sender: Sender::Tab(id),
            body,
        },
        Instant::now(),
    );
    assert_eq!(f.orch.tabs().len(), 1);
    assert!(f.drain().is_empty());
}

#[test]
fn orientation_commands_round_trip() {
    let (mut f, _) = Fixture::started();
    assert_eq!(f.orch.execute(Command::GetOrientation).unwrap(), json!("portrait"));
    assert_eq!(
        f.orch.execute(Command::ToggleOrientation).unwrap(),
        json!("landscape")
    );
    assert_eq!(f.orch.orientation(), Orientation::Landscape);
}

#[test]
fn theme_color_command_reports_last_color() {
    let (mut f, id) = Fixture::started();
    let now = Instant::now();
    f.orch.handle_inbound(
        Inbound::Surface {
            tab_id: id,
            event: SurfaceEvent::DidNavigate {
                url: "https://example.com/".into(),
            },
        },
        now,
    );
    f.orch.handle_inbound(
        Inbound::Ipc {
            sender: Sender::Tab(id),
            body: json!({"kind": "theme-color", "payload": {"color": "#336699"}}).to_string(),
        },
        now,
    );
    assert_eq!(f.orch.execute(Command::GetThemeColor).unwrap(), json!("#336699"));
}

#[test]
fn tick_drives_crash_reload() {
    let (mut f, id) = Fixture::started();
    let t0 = Instant::now();
    f.orch.handle_inbound(
        Inbound::Surface {
            tab_id: id,
            event: SurfaceEvent::RenderProcessGone {
                reason: "oom".into(),
                exit_code: None,
            },
        },
        t0,
    );
    assert_eq!(f.orch.next_deadline(), Some(t0 + Duration::from_secs(2)));

    f.orch.tick(t0 + Duration::from_secs(2));
    let calls = f.calls(id);
    assert!(!calls.contains(&Call::Reload));
    assert!(calls.iter().any(|c| matches!(c, Call::LoadHtml(_))));
    assert_eq!(f.orch.next_deadline(), None);
}

#[test]
fn shutdown_destroys_every_surface() {
    let (mut f, id) = Fixture::started();
    f.orch.shutdown();
    assert!(f.orch.tabs().is_empty());
    assert!(f.calls(id).contains(&Call::Dropped));
}
