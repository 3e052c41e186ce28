use gtk4::prelude::*;
use gtk4::Application;
use log::info;
use medremind_core::config::app_info;

mod config;
mod context;
mod ui;
mod util;

fn main() {
    // Initialize logger
    simple_logger::SimpleLogger::new().init().unwrap();

    info!("Starting {} v{}", app_info::NAME, app_info::VERSION);
    info!("Application ID: {}", app_info::ID);

    let app = Application::builder().application_id(app_info::ID).build();

    app.connect_activate(ui::setup_application_ui);

    app.run();
}
