//! MP3 Batch Converter
//!
//! Main entry point for the application.

mod app;
mod converter;
mod settings;

use app::Mp3BatchApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("Starting MP3 Batch Converter v{}", env!("CARGO_PKG_VERSION"));

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([600.0, 800.0])
            .with_min_inner_size([480.0, 600.0])
            .with_title("MP3 Batch Converter")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the app
    eframe::run_native(
        "MP3 Batch Converter",
        native_options,
        Box::new(|cc| Box::new(Mp3BatchApp::new(cc))),
    )
}
