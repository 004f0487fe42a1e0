use std::time::{Duration, Instant};

use handset_common::{Bounds, HandsetError, MenuAction, SecurityError, TabId, UiEvent};
use handset_webview::{EditCommand, SurfaceEvent};

use super::TabState;
use crate::testing::{Call, Harness};

const NORMAL: Bounds = Bounds {
    x: 14,
    y: 94,
    width: 372,
    height: 752,
};
const FULL: Bounds = Bounds {
    x: 14,
    y: 78,
    width: 372,
    height: 740,
};

fn harness_with_tab() -> (Harness, TabId) {
    let mut h = Harness::new();
    h.tabs.set_layout(NORMAL, FULL);
    let id = h.tabs.create_tab(None).unwrap();
    h.tabs.switch_to_tab(id).unwrap();
    h.drain();
    h.clear_calls();
    (h, id)
}

fn navigate(h: &mut Harness, id: TabId, url: &str) {
    let now = Instant::now();
    h.tabs.handle_event(id, SurfaceEvent::DidStartLoading, now);
    h.tabs.handle_event(id, SurfaceEvent::DidNavigate { url: url.into() }, now);
    h.tabs.handle_event(id, SurfaceEvent::DidStopLoading, now);
}

// -- create --

#[test]
fn create_tab_emits_nothing_and_starts_hidden() {
    let mut h = Harness::new();
    h.tabs.set_layout(NORMAL, FULL);
    let id = h.tabs.create_tab(None).unwrap();

    assert!(h.drain().is_empty());
    assert_eq!(h.tabs.active_id(), None);

    let spec = h.specs.borrow()[0].clone();
    assert_eq!(spec.tab_id, id);
    assert!(!spec.visible);
    assert_eq!(spec.bounds, NORMAL);
    assert_eq!(spec.user_agent, "MobileUA");

    let tab = h.tabs.tab(id).unwrap();
    assert_eq!(tab.url(), "/");
    assert_eq!(tab.title(), "Blank Page");
    assert_eq!(tab.state(), TabState::Loading);
    // The in-memory page store hands the blank page over inline.
    assert!(matches!(&h.calls(id)[0], Call::LoadHtml(html) if html.contains("Blank Page")));
}

#[test]
fn create_tab_sanitizes_and_picks_user_agent() {
    let mut h = Harness::new();
    let a = h.tabs.create_tab(Some("www.youtube.com/watch?v=1")).unwrap();
    let b = h.tabs.create_tab(Some("localhost:3000")).unwrap();

    let specs = h.specs.borrow();
    assert_eq!(specs[0].url, "https://www.youtube.com/watch?v=1");
    assert_eq!(specs[0].user_agent, "DesktopUA");
    assert_eq!(specs[1].url, "http://localhost:3000");
    assert_eq!(specs[1].user_agent, "MobileUA");
    assert_ne!(a, b);
}

#[test]
fn create_tab_rejects_invalid_url() {
    let mut h = Harness::new();
    let err = h.tabs.create_tab(Some("javascript:alert(1)")).unwrap_err();
    assert!(matches!(err, HandsetError::Security(SecurityError::InvalidUrl(_))));
    assert!(h.tabs.is_empty());
    assert!(h.specs.borrow().is_empty());
}

#[test]
fn tab_ids_are_unique_and_increasing() {
    let mut h = Harness::new();
    let a = h.tabs.create_tab(None).unwrap();
    let b = h.tabs.create_tab(None).unwrap();
    h.tabs.close_tab(a).unwrap();
    let c = h.tabs.create_tab(None).unwrap();
    assert!(a < b && b < c);
}

// -- switch --

#[test]
fn switch_detaches_previous_and_announces() {
    let (mut h, first) = harness_with_tab();
    let second = h.tabs.create_tab(None).unwrap();
    h.clear_calls();

    h.tabs.switch_to_tab(second).unwrap();

    assert_eq!(
        h.calls(first),
        vec![Call::CapturePreview, Call::SetVisible(false)]
    );
    assert_eq!(
        h.calls(second),
        vec![Call::SetBounds(NORMAL), Call::SetVisible(true), Call::Focus]
    );

    let events = h.drain();
    assert_eq!(
        events[0],
        UiEvent::ThemeColorUpdated {
            color: "#ffffff".into()
        }
    );
    match &events[1] {
        UiEvent::TabChanged { tab_id, tabs } => {
            assert_eq!(*tab_id, second);
            assert_eq!(tabs.len(), 2);
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(h.tabs.active_id(), Some(second));
}

#[test]
fn switch_to_active_is_noop() {
    let (mut h, id) = harness_with_tab();
    h.tabs.switch_to_tab(id).unwrap();
    assert!(h.drain().is_empty());
    assert!(h.calls(id).is_empty());
}

#[test]
fn switch_to_unknown_tab_fails() {
    let (mut h, _) = harness_with_tab();
    assert!(h.tabs.switch_to_tab(TabId(99)).is_err());
}

#[test]
fn switch_uses_cached_color_for_domain() {
    let (mut h, first) = harness_with_tab();
    navigate(&mut h, first, "https://example.com/");
    h.tabs.handle_event(
        first,
        SurfaceEvent::ThemeColor {
            color: "#123456".into(),
        },
        Instant::now(),
    );

    let second = h.tabs.create_tab(None).unwrap();
    h.tabs.switch_to_tab(second).unwrap();
    h.drain();

    h.tabs.switch_to_tab(first).unwrap();
    let events = h.drain();
    assert_eq!(
        events[0],
        UiEvent::ThemeColorUpdated {
            color: "#123456".into()
        }
    );
}

// -- close --

#[test]
fn closing_only_tab_leaves_one_fresh_active_tab() {
    let (mut h, id) = harness_with_tab();
    h.tabs.close_tab(id).unwrap();

    assert_eq!(h.tabs.len(), 1);
    let fresh = h.tabs.tabs()[0].id();
    assert_ne!(fresh, id);
    assert_eq!(h.tabs.active_id(), Some(fresh));
    assert!(h.calls(id).contains(&Call::Dropped));

    let events = h.drain();
    assert!(events
        .iter()
        .any(|e| matches!(e, UiEvent::TabChanged { tab_id, .. } if *tab_id == fresh)));
}

#[test]
fn closing_active_activates_predecessor() {
    let (mut h, a) = harness_with_tab();
    let b = h.tabs.create_tab(None).unwrap();
    let c = h.tabs.create_tab(None).unwrap();
    h.tabs.switch_to_tab(c).unwrap();

    h.tabs.close_tab(c).unwrap();
    assert_eq!(h.tabs.active_id(), Some(b));

    h.tabs.switch_to_tab(a).unwrap();
    h.tabs.close_tab(a).unwrap();
    // Nothing before index 0: the new first tab takes over.
    assert_eq!(h.tabs.active_id(), Some(b));
}

#[test]
fn closing_inactive_emits_tabs_updated() {
    let (mut h, a) = harness_with_tab();
    let b = h.tabs.create_tab(None).unwrap();
    h.drain();

    h.tabs.close_tab(b).unwrap();
    let events = h.drain();
    assert_eq!(
        events,
        vec![UiEvent::TabsUpdated {
            tabs: vec![h.tabs.tab(a).unwrap().summary()],
            active_id: Some(a),
        }]
    );
    assert_eq!(h.tabs.active_id(), Some(a));
}

#[test]
fn close_all_leaves_single_fresh_tab() {
    let (mut h, a) = harness_with_tab();
    let b = h.tabs.create_tab(None).unwrap();

    let fresh = h.tabs.close_all_tabs().unwrap();
    assert_eq!(h.tabs.len(), 1);
    assert_eq!(h.tabs.active_id(), Some(fresh));
    assert!(h.calls(a).contains(&Call::Dropped));
    assert!(h.calls(b).contains(&Call::Dropped));
}

// -- crashes --

fn crash(h: &mut Harness, id: TabId, at: Instant) {
    h.tabs.handle_event(
        id,
        SurfaceEvent::RenderProcessGone {
            reason: "crashed".into(),
            exit_code: Some(11),
        },
        at,
    );
}

const CRASHY: &str = "https://crashy.example/app";

/// A tab showing a real page, with the call log cleared.
fn tab_on_page() -> (Harness, TabId) {
    let (mut h, id) = harness_with_tab();
    navigate(&mut h, id, CRASHY);
    h.drain();
    h.clear_calls();
    (h, id)
}

/// Reloads issued through the engine rather than the page.
fn reload_count(h: &Harness, id: TabId) -> usize {
    h.calls(id)
        .iter()
        .filter(|c| matches!(c, Call::LoadUrl(url) if url == CRASHY))
        .count()
}

#[test]
fn three_crashes_in_window_reload_at_most_twice() {
    let (mut h, id) = tab_on_page();
    let t0 = Instant::now();

    crash(&mut h, id, t0);
    h.tabs.tick(t0 + Duration::from_millis(1999));
    assert_eq!(reload_count(&h, id), 0);
    h.tabs.tick(t0 + Duration::from_secs(2));
    assert_eq!(reload_count(&h, id), 1);

    crash(&mut h, id, t0 + Duration::from_secs(3));
    h.tabs.tick(t0 + Duration::from_secs(5));
    assert_eq!(reload_count(&h, id), 2);

    crash(&mut h, id, t0 + Duration::from_secs(6));
    let tab = h.tabs.tab(id).unwrap();
    assert_eq!(tab.state(), TabState::Crashed);
    assert!(tab.reload_deadline().is_none());
    assert_eq!(tab.url(), "/");
    assert_eq!(tab.title(), "cannot open the page");

    h.tabs.tick(t0 + Duration::from_secs(60));
    assert_eq!(reload_count(&h, id), 2);

    let gone = h
        .drain()
        .into_iter()
        .filter(|e| matches!(e, UiEvent::RenderProcessGone { .. }))
        .count();
    assert_eq!(gone, 3);
}

#[test]
fn crash_counter_resets_after_quiet_period() {
    let (mut h, id) = tab_on_page();
    let t0 = Instant::now();
    crash(&mut h, id, t0);
    crash(&mut h, id, t0 + Duration::from_secs(1));
    crash(&mut h, id, t0 + Duration::from_secs(20));

    let tab = h.tabs.tab(id).unwrap();
    assert_eq!(tab.crash_count(), 1);
    assert!(tab.reload_deadline().is_some());
}

#[test]
fn crash_reload_is_cancelled_when_tab_closes() {
    let (mut h, id) = tab_on_page();
    let t0 = Instant::now();
    crash(&mut h, id, t0);
    assert!(h.tabs.next_deadline().is_some());

    h.tabs.close_tab(id).unwrap();
    h.tabs.tick(t0 + Duration::from_secs(5));
    assert_eq!(reload_count(&h, id), 0);
}

#[test]
fn automatic_reload_loads_the_page_url() {
    let (mut h, id) = tab_on_page();
    let t0 = Instant::now();
    crash(&mut h, id, t0);
    h.tabs.tick(t0 + Duration::from_secs(2));

    assert_eq!(h.calls(id), vec![Call::LoadUrl(CRASHY.into())]);
    assert_eq!(h.tabs.tab(id).unwrap().state(), TabState::Loading);
}

#[test]
fn automatic_reload_of_inline_blank_page_renders_it_again() {
    let (mut h, id) = harness_with_tab();
    let t0 = Instant::now();
    crash(&mut h, id, t0);
    h.tabs.tick(t0 + Duration::from_secs(2));

    let calls = h.calls(id);
    assert_eq!(calls.len(), 1);
    assert!(matches!(&calls[0], Call::LoadHtml(html) if html.contains("Blank Page")));
}

#[test]
fn manual_reload_recovers_crashed_tab() {
    let (mut h, id) = tab_on_page();
    let t0 = Instant::now();
    crash(&mut h, id, t0);
    h.tabs.reload().unwrap();

    let tab = h.tabs.tab(id).unwrap();
    assert_eq!(tab.state(), TabState::Loading);
    assert!(tab.reload_deadline().is_none());
    assert_eq!(h.calls(id), vec![Call::LoadUrl(CRASHY.into())]);
}

#[test]
fn manual_reload_after_giving_up_loads_the_failed_url() {
    let (mut h, id) = tab_on_page();
    let t0 = Instant::now();
    for secs in 0..3 {
        crash(&mut h, id, t0 + Duration::from_secs(secs));
    }
    assert_eq!(h.tabs.tab(id).unwrap().state(), TabState::Crashed);
    h.clear_calls();

    h.tabs.reload().unwrap();
    assert_eq!(h.calls(id), vec![Call::LoadUrl(CRASHY.into())]);
}

#[test]
fn reload_of_a_live_tab_goes_through_the_page() {
    let (mut h, id) = tab_on_page();
    h.tabs.reload().unwrap();
    assert_eq!(h.calls(id), vec![Call::Reload]);
}

// -- failures --

#[test]
fn http_404_shows_error_page() {
    let (mut h, id) = harness_with_tab();
    navigate(&mut h, id, "https://example.com/missing");
    h.drain();
    h.clear_calls();

    h.tabs.handle_event(
        id,
        SurfaceEvent::HttpResponse {
            status: 404,
            url: "https://example.com/missing".into(),
            main_frame: true,
        },
        Instant::now(),
    );

    let tab = h.tabs.tab(id).unwrap();
    assert_eq!(tab.url(), "/");
    assert_eq!(tab.title(), "cannot open the page");

    let calls = h.calls(id);
    assert!(matches!(&calls[0], Call::LoadHtml(html)
        if html.contains(r#"data-code="404""#) && html.contains("https://example.com/missing")));

    let events = h.drain();
    assert_eq!(
        events[0],
        UiEvent::HttpError {
            code: 404,
            text: "Not Found".into(),
            url: "https://example.com/missing".into(),
        }
    );
}

#[test]
fn success_and_subframe_responses_are_ignored() {
    let (mut h, id) = harness_with_tab();
    let now = Instant::now();
    h.tabs.handle_event(
        id,
        SurfaceEvent::HttpResponse {
            status: 200,
            url: "https://a.com".into(),
            main_frame: true,
        },
        now,
    );
    h.tabs.handle_event(
        id,
        SurfaceEvent::HttpResponse {
            status: 500,
            url: "https://a.com/frame".into(),
            main_frame: false,
        },
        now,
    );
    assert!(h.calls(id).is_empty());
    assert!(h.drain().is_empty());
}

#[test]
fn failed_load_shows_error_page_with_table_text() {
    let (mut h, id) = harness_with_tab();
    h.tabs.handle_event(
        id,
        SurfaceEvent::DidFailLoad {
            code: -105,
            description: "ERR_NAME_NOT_RESOLVED".into(),
            url: "https://nope.invalid".into(),
            main_frame: true,
        },
        Instant::now(),
    );

    assert!(matches!(&h.calls(id)[0], Call::LoadHtml(html) if html.contains("Name Not Resolved")));
    let events = h.drain();
    assert_eq!(
        events[0],
        UiEvent::DidFailLoad {
            code: -105,
            description: "ERR_NAME_NOT_RESOLVED".into()
        }
    );
}

#[test]
fn aborted_load_never_shows_error_page() {
    let (mut h, id) = harness_with_tab();
    h.tabs.handle_event(
        id,
        SurfaceEvent::DidFailLoad {
            code: -3,
            description: "ERR_ABORTED".into(),
            url: "https://a.com".into(),
            main_frame: true,
        },
        Instant::now(),
    );
    assert!(h.calls(id).is_empty());
    assert!(h.drain().is_empty());
}

#[test]
fn error_page_navigation_keeps_error_title() {
    let (mut h, id) = harness_with_tab();
    h.tabs.handle_event(
        id,
        SurfaceEvent::DidFailLoad {
            code: -102,
            description: String::new(),
            url: "https://a.com".into(),
            main_frame: true,
        },
        Instant::now(),
    );
    // Inline error documents commit as about:blank.
    navigate(&mut h, id, "about:blank");
    let tab = h.tabs.tab(id).unwrap();
    assert_eq!(tab.url(), "/");
    assert_eq!(tab.title(), "cannot open the page");
}

// -- navigation --

#[test]
fn navigation_updates_url_history_and_events() {
    let (mut h, id) = harness_with_tab();
    navigate(&mut h, id, "https://a.com/");
    navigate(&mut h, id, "https://b.com/");

    assert_eq!(h.tabs.url().unwrap(), "https://b.com/");
    assert!(h.tabs.can_go_back().unwrap());
    assert!(!h.tabs.can_go_forward().unwrap());

    let events = h.drain();
    assert!(events.contains(&UiEvent::DidNavigate {
        url: "https://b.com/".into()
    }));
    assert!(events.contains(&UiEvent::DidStartLoading));
    assert!(events.contains(&UiEvent::DidStopLoading));
    assert_eq!(h.tabs.tab(id).unwrap().state(), TabState::Ready);
}

#[test]
fn navigating_to_blank_page_shows_placeholder() {
    let (mut h, id) = harness_with_tab();
    navigate(&mut h, id, "https://a.com/");
    h.tabs.handle_event(
        id,
        SurfaceEvent::TitleChanged {
            title: "A".into(),
        },
        Instant::now(),
    );
    assert_eq!(h.tabs.title().unwrap(), "A");

    navigate(&mut h, id, "about:blank");
    assert_eq!(h.tabs.url().unwrap(), "/");
    assert_eq!(h.tabs.title().unwrap(), "Blank Page");

    // Titles reported by internal pages are not shown.
    h.tabs.handle_event(
        id,
        SurfaceEvent::TitleChanged {
            title: "file.html".into(),
        },
        Instant::now(),
    );
    assert_eq!(h.tabs.title().unwrap(), "Blank Page");
}

#[test]
fn blocked_navigation_is_reported_without_touching_the_page() {
    let (mut h, id) = harness_with_tab();
    h.tabs.handle_event(
        id,
        SurfaceEvent::WillNavigate {
            url: "javascript:alert(1)".into(),
        },
        Instant::now(),
    );
    assert!(h.calls(id).is_empty());
    assert_eq!(
        h.drain(),
        vec![UiEvent::NavigationBlocked {
            url: "javascript:alert(1)".into()
        }]
    );
}

#[test]
fn allowed_navigation_requests_matching_user_agent() {
    let (mut h, id) = harness_with_tab();
    h.tabs.handle_event(
        id,
        SurfaceEvent::WillNavigate {
            url: "https://m.youtube.com/".into(),
        },
        Instant::now(),
    );
    assert_eq!(h.calls(id), vec![Call::SetUserAgent("DesktopUA".into())]);
    assert!(h.drain().is_empty());
}

#[test]
fn load_url_rejects_blocked_host() {
    let gate = crate::testing::gate().with_blocked_hosts(vec!["ads.example".to_string()]);
    let mut h = Harness::with_gate(gate);
    let id = h.tabs.create_tab(None).unwrap();
    h.tabs.switch_to_tab(id).unwrap();
    h.drain();

    assert!(h.tabs.load_url("https://x.ads.example/").is_err());
    assert_eq!(
        h.drain(),
        vec![UiEvent::NavigationBlocked {
            url: "https://x.ads.example/".into()
        }]
    );
}

#[test]
fn load_url_sanitizes_input() {
    let (mut h, id) = harness_with_tab();
    h.tabs.load_url("example.com").unwrap();
    assert!(h.calls(id).contains(&Call::LoadUrl("https://example.com".into())));
}

#[test]
fn new_window_request_becomes_active_tab() {
    let (mut h, opener) = harness_with_tab();
    h.tabs.handle_event(
        opener,
        SurfaceEvent::NewWindowRequested {
            url: "https://popup.com/".into(),
        },
        Instant::now(),
    );

    assert_eq!(h.tabs.len(), 2);
    let new_id = h.tabs.active_id().unwrap();
    assert_ne!(new_id, opener);
    assert_eq!(h.tabs.tab(new_id).unwrap().location(), "https://popup.com/");
}

#[test]
fn new_window_with_bad_url_is_blocked() {
    let (mut h, opener) = harness_with_tab();
    h.tabs.handle_event(
        opener,
        SurfaceEvent::NewWindowRequested {
            url: "data:text/html,hi".into(),
        },
        Instant::now(),
    );
    assert_eq!(h.tabs.len(), 1);
    assert!(matches!(h.drain()[0], UiEvent::NavigationBlocked { .. }));
}

// -- theme color --

#[test]
fn reported_color_is_cached_and_emitted() {
    let (mut h, id) = harness_with_tab();
    navigate(&mut h, id, "https://example.com/page");
    h.drain();

    h.tabs.handle_event(
        id,
        SurfaceEvent::ThemeColor {
            color: "#FF0000".into(),
        },
        Instant::now(),
    );
    assert_eq!(
        h.drain(),
        vec![UiEvent::ThemeColorUpdated {
            color: "#ff0000".into()
        }]
    );
    assert_eq!(h.tabs.cache().peek("example.com").unwrap().color, "#ff0000");
    assert_eq!(h.tabs.theme_color(), "#ff0000");
}

#[test]
fn unsafe_color_is_rejected() {
    let (mut h, id) = harness_with_tab();
    navigate(&mut h, id, "https://example.com/");
    h.drain();
    h.tabs.handle_event(
        id,
        SurfaceEvent::ThemeColor {
            color: "red; background:url(x)".into(),
        },
        Instant::now(),
    );
    assert!(h.drain().is_empty());
    assert!(h.tabs.cache().is_empty());
}

#[test]
fn loading_emits_cached_color_without_reset() {
    let (mut h, id) = harness_with_tab();
    navigate(&mut h, id, "https://example.com/");
    h.tabs.handle_event(
        id,
        SurfaceEvent::ThemeColor {
            color: "#00ff00".into(),
        },
        Instant::now(),
    );
    h.drain();

    h.tabs
        .handle_event(id, SurfaceEvent::DidStartLoading, Instant::now());
    assert_eq!(
        h.drain(),
        vec![
            UiEvent::DidStartLoading,
            UiEvent::ThemeColorUpdated {
                color: "#00ff00".into()
            }
        ]
    );
}

#[test]
fn inactive_tab_color_is_cached_not_emitted() {
    let (mut h, _) = harness_with_tab();
    let background = h.tabs.create_tab(Some("https://bg.com")).unwrap();
    navigate(&mut h, background, "https://bg.com/");
    h.drain();

    h.tabs.handle_event(
        background,
        SurfaceEvent::ThemeColor {
            color: "#0000ff".into(),
        },
        Instant::now(),
    );
    assert!(h.drain().is_empty());
    assert!(h.tabs.cache().peek("bg.com").is_some());
}

// -- fullscreen --

#[test]
fn fullscreen_round_trip_restores_bounds() {
    let (mut h, id) = harness_with_tab();
    let now = Instant::now();

    h.tabs.handle_event(id, SurfaceEvent::EnterFullscreen, now);
    assert_eq!(h.tabs.tab(id).unwrap().state(), TabState::Fullscreen);
    assert_eq!(h.calls(id), vec![Call::SetBounds(FULL)]);
    assert!(h.tabs.take_relayout_request());
    assert!(!h.tabs.take_relayout_request());
    assert_eq!(
        h.drain(),
        vec![UiEvent::FullscreenModeChanged { fullscreen: true }]
    );

    h.clear_calls();
    h.tabs.handle_event(id, SurfaceEvent::LeaveFullscreen, now);
    assert_eq!(h.tabs.tab(id).unwrap().state(), TabState::Ready);
    assert_eq!(h.calls(id), vec![Call::SetBounds(NORMAL)]);
    assert!(h.tabs.take_relayout_request());
    assert_eq!(
        h.drain(),
        vec![UiEvent::FullscreenModeChanged { fullscreen: false }]
    );
}

#[test]
fn exit_fullscreen_only_signals_fullscreen_tabs() {
    let (mut h, id) = harness_with_tab();
    h.tabs.exit_fullscreen(id).unwrap();
    assert!(h.calls(id).is_empty());

    h.tabs
        .handle_event(id, SurfaceEvent::EnterFullscreen, Instant::now());
    h.clear_calls();
    h.tabs.exit_fullscreen(id).unwrap();
    assert_eq!(h.calls(id), vec![Call::ExitFullscreen]);
    // The surface's own report is authoritative.
    assert_eq!(h.tabs.tab(id).unwrap().state(), TabState::Fullscreen);
}

#[test]
fn crash_in_fullscreen_restores_bounds() {
    let (mut h, id) = harness_with_tab();
    let now = Instant::now();
    h.tabs.handle_event(id, SurfaceEvent::EnterFullscreen, now);
    h.clear_calls();
    h.drain();

    crash(&mut h, id, now);
    assert_eq!(h.calls(id)[0], Call::SetBounds(NORMAL));
    assert!(h
        .drain()
        .contains(&UiEvent::FullscreenModeChanged { fullscreen: false }));
}

// -- context menu --

#[test]
fn context_menu_reflects_history_and_runs_actions() {
    let (mut h, id) = harness_with_tab();
    navigate(&mut h, id, "https://a.com/");
    navigate(&mut h, id, "https://b.com/");
    h.drain();
    h.clear_calls();

    h.tabs
        .handle_event(id, SurfaceEvent::ContextMenu { x: 5.0, y: 6.0 }, Instant::now());
    let events = h.drain();
    let UiEvent::ContextMenu { tab_id, items } = &events[0] else {
        panic!("expected context menu");
    };
    assert_eq!(*tab_id, id);
    assert_eq!(items.len(), 7);
    assert!(items[0].enabled, "back should be enabled");
    assert!(!items[1].enabled, "forward should be disabled");
    assert!(!items[6].enabled, "inspect needs dev mode");

    h.tabs.context_menu_action(MenuAction::SelectAll).unwrap();
    h.tabs.context_menu_action(MenuAction::Back).unwrap();
    assert_eq!(
        h.calls(id),
        vec![Call::Edit(EditCommand::SelectAll), Call::GoBack]
    );
}

// -- previews --

#[test]
fn preview_is_last_write_wins() {
    let (mut h, id) = harness_with_tab();
    let now = Instant::now();
    for n in 1..=2 {
        h.tabs.handle_event(
            id,
            SurfaceEvent::PreviewCaptured {
                data_url: format!("data:image/png;base64,{n}"),
            },
            now,
        );
    }
    assert_eq!(
        h.tabs.tab(id).unwrap().preview(),
        Some("data:image/png;base64,2")
    );
}

#[test]
fn events_for_closed_tabs_are_ignored() {
    let (mut h, id) = harness_with_tab();
    let other = h.tabs.create_tab(None).unwrap();
    h.tabs.close_tab(other).unwrap();
    h.drain();

    h.tabs.handle_event(
        other,
        SurfaceEvent::PreviewCaptured {
            data_url: "data:".into(),
        },
        Instant::now(),
    );
    h.tabs
        .handle_event(other, SurfaceEvent::DidStartLoading, Instant::now());
    assert!(h.drain().is_empty());
    assert_eq!(h.tabs.active_id(), Some(id));
}
