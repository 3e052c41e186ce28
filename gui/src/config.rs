//! GUI-only constants. Shared values live in `medremind_core::config`.

/// Resource paths inside the compiled gresource bundle.
pub mod resources {
    pub const MAIN_UI: &str = "/dev/medremind/MedRemind/ui/main.ui";
    pub const ADD_MEDICATION_UI: &str = "/dev/medremind/MedRemind/ui/add_medication_dialog.ui";
    pub const STYLE_CSS: &str = "/dev/medremind/MedRemind/css/style.css";
}

/// Stack page names.
pub mod pages {
    pub const AUTH: &str = "auth";
    pub const DASHBOARD: &str = "dashboard";
}

/// Route handled in-app by the add-medication dialog.
pub const ADD_MEDICATION_ROUTE: &str = "medication/add";

/// A dashboard tile routing to a sub-flow.
pub struct QuickAction {
    pub label: &'static str,
    pub icon: &'static str,
    pub route: &'static str,
    pub css_class: &'static str,
}

pub const QUICK_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Add\nMedication",
        icon: "list-add-symbolic",
        route: ADD_MEDICATION_ROUTE,
        css_class: "action-add",
    },
    QuickAction {
        label: "Calendar\nView",
        icon: "x-office-calendar-symbolic",
        route: "calendar",
        css_class: "action-calendar",
    },
    QuickAction {
        label: "History\nLog",
        icon: "document-open-recent-symbolic",
        route: "history",
        css_class: "action-history",
    },
    QuickAction {
        label: "Refill\nTracker",
        icon: "view-refresh-symbolic",
        route: "refills",
        css_class: "action-refills",
    },
];
