//! User Interface handling functionality.
//!
//! - `app`: Application setup and initialization
//! - `auth_ui`: Authentication gate card
//! - `dashboard_ui`: Progress ring and quick actions
//! - `medication_ui`: Add-medication dialog
//! - `navigation`: Gate hand-off and quick action routing

pub mod app;
pub mod auth_ui;
pub mod dashboard_ui;
pub mod medication_ui;
pub mod navigation;

// Re-export commonly used items
pub use app::setup_application_ui;
