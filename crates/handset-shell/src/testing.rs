//! Recording doubles for surfaces and the host window.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use handset_common::{Bounds, CapabilityToken, EventBus, Size, SurfaceError, TabId, UiEvent};
use handset_webview::{
    ContentSurface, EditCommand, PageStore, SecurityGate, SurfaceFactory, SurfaceSpec, UserAgents,
};
use tokio::sync::broadcast;

use crate::controller::HostWindow;
use crate::tabs::{TabManager, TabPolicy};
use crate::theme_cache::ThemeColorCache;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    LoadUrl(String),
    LoadHtml(String),
    Reload,
    GoBack,
    GoForward,
    SetBounds(Bounds),
    SetVisible(bool),
    Focus,
    SetUserAgent(String),
    CapturePreview,
    ExitFullscreen,
    Edit(EditCommand),
    OpenDevtools,
    Dropped,
}

pub type CallLog = Rc<RefCell<Vec<(TabId, Call)>>>;

pub struct MockSurface {
    tab_id: TabId,
    log: CallLog,
}

impl MockSurface {
    fn record(&self, call: Call) -> Result<(), SurfaceError> {
        self.log.borrow_mut().push((self.tab_id, call));
        Ok(())
    }
}

impl ContentSurface for MockSurface {
    fn load_url(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.record(Call::LoadUrl(url.to_string()))
    }
    fn load_html(&mut self, html: &str) -> Result<(), SurfaceError> {
        self.record(Call::LoadHtml(html.to_string()))
    }
    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::Reload)
    }
    fn go_back(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::GoBack)
    }
    fn go_forward(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::GoForward)
    }
    fn set_bounds(&mut self, bounds: Bounds) -> Result<(), SurfaceError> {
        self.record(Call::SetBounds(bounds))
    }
    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
        self.record(Call::SetVisible(visible))
    }
    fn focus(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::Focus)
    }
    fn set_user_agent(&mut self, user_agent: &str) -> Result<(), SurfaceError> {
        self.record(Call::SetUserAgent(user_agent.to_string()))
    }
    fn capture_preview(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::CapturePreview)
    }
    fn exit_fullscreen(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::ExitFullscreen)
    }
    fn edit(&mut self, command: EditCommand) -> Result<(), SurfaceError> {
        self.record(Call::Edit(command))
    }
    fn open_devtools(&mut self) -> Result<(), SurfaceError> {
        self.record(Call::OpenDevtools)
    }
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        self.log.borrow_mut().push((self.tab_id, Call::Dropped));
    }
}

#[derive(Default)]
pub struct MockFactory {
    pub log: CallLog,
    pub specs: Rc<RefCell<Vec<SurfaceSpec>>>,
}

impl SurfaceFactory for MockFactory {
    fn create(&mut self, spec: SurfaceSpec) -> Result<Box<dyn ContentSurface>, SurfaceError> {
        let tab_id = spec.tab_id;
        self.specs.borrow_mut().push(spec);
        Ok(Box::new(MockSurface {
            tab_id,
            log: Rc::clone(&self.log),
        }))
    }
}

/// Host window whose size changes are recorded.
#[derive(Clone, Default)]
pub struct MockHost {
    pub size: Rc<RefCell<Option<Size>>>,
    pub min: Rc<RefCell<Option<Size>>>,
    pub resizes: Rc<RefCell<Vec<Size>>>,
}

impl HostWindow for MockHost {
    fn inner_size(&self) -> Size {
        self.size.borrow().unwrap_or(Size::new(400.0, 860.0))
    }
    fn set_inner_size(&self, size: Size) {
        *self.size.borrow_mut() = Some(size);
        self.resizes.borrow_mut().push(size);
    }
    fn set_min_inner_size(&self, size: Size) {
        *self.min.borrow_mut() = Some(size);
    }
}

pub fn gate() -> SecurityGate {
    SecurityGate::new(
        CapabilityToken::generate(),
        UserAgents {
            streaming_domain: "youtube.com".into(),
            desktop: "DesktopUA".into(),
            mobile: "MobileUA".into(),
        },
    )
}

/// Everything a tab manager test needs to observe.
pub struct Harness {
    pub tabs: TabManager,
    pub log: CallLog,
    pub specs: Rc<RefCell<Vec<SurfaceSpec>>>,
    pub events: broadcast::Receiver<UiEvent>,
    pub gate: Arc<SecurityGate>,
    pub bus: EventBus,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_gate(gate())
    }

    pub fn with_gate(gate: SecurityGate) -> Self {
        let factory = MockFactory::default();
        let log = Rc::clone(&factory.log);
        let specs = Rc::clone(&factory.specs);
        let bus = EventBus::new(256);
        let events = bus.subscribe();
        let gate = Arc::new(gate);
        let tabs = TabManager::new(
            Box::new(factory),
            Arc::clone(&gate),
            PageStore::in_memory(),
            ThemeColorCache::new(100, Duration::from_millis(1000)),
            bus.clone(),
            TabPolicy::default(),
        );
        Self {
            tabs,
            log,
            specs,
            events,
            gate,
            bus,
        }
    }

    pub fn drain(&mut self) -> Vec<UiEvent> {
        handset_common::events::drain(&mut self.events)
    }

    pub fn calls(&self, id: TabId) -> Vec<Call> {
        self.log
            .borrow()
            .iter()
            .filter(|(tab, _)| *tab == id)
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub fn clear_calls(&self) {
        self.log.borrow_mut().clear();
    }
}
