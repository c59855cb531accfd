// Weekly Calendar demo
// Main entry point

use std::path::PathBuf;

use weekly_calendar::services::feed::load_events;
use weekly_calendar::services::settings::SettingsService;
use weekly_calendar::ui_egui::CalendarApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Weekly Calendar");

    let events = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load_events(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load events: {:#}, starting empty", e);
            Vec::new()
        }),
        None => Vec::new(),
    };

    let settings_service = SettingsService::with_default_path();
    let app = CalendarApp::new(events, settings_service);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Weekly Calendar")
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Weekly Calendar",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
