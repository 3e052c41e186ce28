//! Application setup and initialization functionality.

use crate::config::{pages, resources};
use crate::context::{AppContext, AuthWidgets, DashboardWidgets, UiComponents};
use crate::ui::{auth_ui, dashboard_ui};
use gtk4::glib;
use gtk4::prelude::*;
use gtk4::{gio, Application, ApplicationWindow, Builder, CssProvider, Label};
use log::{info, warn};
use medremind_core::config::app_info;

use std::sync::Arc;
use tokio::runtime::Runtime;

/// Initialize and set up main application UI.
pub fn setup_application_ui(app: &Application) {
    info!("Initializing application components");

    let rt = Arc::new(
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .expect("Failed to build Tokio runtime"),
    );
    info!("Tokio async runtime initialized");

    setup_resources_and_theme();

    let builder = Builder::from_resource(resources::MAIN_UI);
    let window = create_main_window(app, &builder);

    let ctx = setup_ui_components(rt, &builder);

    auth_ui::setup_auth_gate(&ctx);
    dashboard_ui::setup_dashboard(&ctx);
    setup_teardown(&window, &ctx);

    info!("Setting initial view to authentication page");
    ctx.ui.stack.set_visible_child_name(pages::AUTH);
    window.present();
    info!("MedRemind application startup complete");
}

/// Set up resources and theme.
fn setup_resources_and_theme() {
    gio::resources_register_include!("medremind.gresource")
        .expect("Failed to register gresources");

    if let Some(display) = gtk4::gdk::Display::default() {
        info!("Setting up UI theme and styling");
        let css_provider = CssProvider::new();
        css_provider.load_from_resource(resources::STYLE_CSS);
        gtk4::style_context_add_provider_for_display(
            &display,
            &css_provider,
            gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
        info!("UI theme and styling loaded successfully");
    } else {
        warn!("No default display found - UI theming may not work properly");
    }
}

/// Create main application window.
fn create_main_window(app: &Application, builder: &Builder) -> ApplicationWindow {
    let window: ApplicationWindow = extract_widget(builder, "app_window");
    window.set_application(Some(app));
    window.set_title(Some(app_info::NAME));

    let title: Label = extract_widget(builder, "title_label");
    title.set_text(app_info::NAME);
    let tagline: Label = extract_widget(builder, "tagline_label");
    tagline.set_text(app_info::TAGLINE);
    window
}

/// Helper to extract widgets from builder with consistent error handling.
pub fn extract_widget<T: IsA<glib::Object>>(builder: &Builder, name: &str) -> T {
    builder
        .object(name)
        .unwrap_or_else(|| panic!("Failed to get {}", name))
}

/// Set up UI components and return application context.
fn setup_ui_components(rt: Arc<Runtime>, builder: &Builder) -> AppContext {
    let auth = AuthWidgets {
        instruction: extract_widget(builder, "instruction_label"),
        button: extract_widget(builder, "auth_button"),
        button_icon: extract_widget(builder, "auth_icon"),
        button_label: extract_widget(builder, "auth_button_label"),
        fallback_button: extract_widget(builder, "fallback_button"),
        error_box: extract_widget(builder, "error_box"),
        error_label: extract_widget(builder, "error_label"),
    };

    let dashboard = DashboardWidgets {
        progress_area: extract_widget(builder, "progress_area"),
        percent_label: extract_widget(builder, "percent_label"),
        doses_label: extract_widget(builder, "doses_label"),
        take_dose_button: extract_widget(builder, "take_dose_button"),
        actions_flow: extract_widget(builder, "actions_flow"),
    };

    info!("All UI components successfully initialized from builder");

    let ui = UiComponents {
        stack: extract_widget(builder, "stack"),
        auth,
        dashboard,
    };
    AppContext::new(rt, ui)
}

/// Tear down the gate session and ring animation when the window closes.
fn setup_teardown(window: &ApplicationWindow, ctx: &AppContext) {
    let ctx = ctx.clone();
    window.connect_close_request(move |_| {
        info!("Main window closing, discarding in-flight work");
        ctx.gate.borrow_mut().teardown();
        ctx.cancel_ring_timer();
        ctx.ring.borrow_mut().unmount();
        glib::Propagation::Proceed
    });
}
