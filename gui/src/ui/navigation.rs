//! Gate hand-off and quick action routing.

use crate::config::{pages, QuickAction, ADD_MEDICATION_ROUTE};
use crate::context::AppContext;
use crate::ui::{dashboard_ui, medication_ui};
use gtk4::prelude::*;
use log::info;
use medremind_core::auth::Navigator;

/// Replaces the authentication page with the dashboard in the main stack.
pub struct StackNavigator {
    ctx: AppContext,
}

impl StackNavigator {
    pub fn new(ctx: &AppContext) -> Self {
        Self { ctx: ctx.clone() }
    }
}

impl Navigator for StackNavigator {
    fn replace_with_dashboard(&self) {
        let stack = &self.ctx.ui.stack;
        info!("Navigating to dashboard");
        stack.set_visible_child_name(pages::DASHBOARD);

        // Replace, not push: there is no way back to the gate.
        if let Some(auth_page) = stack.child_by_name(pages::AUTH) {
            stack.remove(&auth_page);
        }
        self.ctx.gate.borrow_mut().teardown();

        dashboard_ui::refresh_dashboard(&self.ctx);
    }
}

/// Route a quick action tile.
///
/// Only adding a medication is handled here; other routes are logged.
pub fn open_quick_action(ctx: &AppContext, action: &QuickAction) {
    info!(
        "User selected quick action '{}' (route {})",
        action.label.replace('\n', " "),
        action.route
    );
    if action.route == ADD_MEDICATION_ROUTE {
        medication_ui::show_add_medication_dialog(ctx);
    }
}
