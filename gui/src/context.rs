//! Shared context for the authentication gate and dashboard.

use gtk4::{Box as GtkBox, Button, DrawingArea, FlowBox, Image, Label, Stack, TickCallbackId};
use medremind_core::auth::{AuthGate, SystemAuthenticator};
use medremind_core::dose::InMemoryStore;
use medremind_core::progress::ProgressRing;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Main application context. Cloning shares the same state.
#[derive(Clone)]
pub struct AppContext {
    pub rt: Arc<Runtime>,
    pub provider: SystemAuthenticator,
    pub ui: UiComponents,
    pub gate: Rc<RefCell<AuthGate>>,
    pub ring: Rc<RefCell<ProgressRing>>,
    pub ring_tick: Rc<RefCell<Option<TickCallbackId>>>,
    pub store: Rc<RefCell<InMemoryStore>>,
}

/// UI components grouped by page.
#[derive(Clone)]
pub struct UiComponents {
    pub stack: Stack,
    pub auth: AuthWidgets,
    pub dashboard: DashboardWidgets,
}

/// Authentication card widgets.
#[derive(Clone)]
pub struct AuthWidgets {
    pub instruction: Label,
    pub button: Button,
    pub button_icon: Image,
    pub button_label: Label,
    pub fallback_button: Button,
    pub error_box: GtkBox,
    pub error_label: Label,
}

/// Dashboard widgets.
#[derive(Clone)]
pub struct DashboardWidgets {
    pub progress_area: DrawingArea,
    pub percent_label: Label,
    pub doses_label: Label,
    pub take_dose_button: Button,
    pub actions_flow: FlowBox,
}

impl AppContext {
    /// Create a new context with a fresh gate session and an empty store.
    pub fn new(rt: Arc<Runtime>, ui: UiComponents) -> Self {
        Self {
            rt,
            provider: SystemAuthenticator::new(),
            ui,
            gate: Rc::new(RefCell::new(AuthGate::new())),
            ring: Rc::new(RefCell::new(ProgressRing::default())),
            ring_tick: Rc::new(RefCell::new(None)),
            store: Rc::new(RefCell::new(InMemoryStore::new())),
        }
    }

    /// Cancel the ring's frame timer, if one is running.
    pub fn cancel_ring_timer(&self) {
        if let Some(id) = self.ring_tick.borrow_mut().take() {
            id.remove();
        }
    }
}
