//! Desktop front-end: the same egui view as the browser build
//!
//! Run with: cargo run --features native --bin hub-desktop

use eframe::egui;
use noetic_hub::app::HubApp;
use noetic_hub::config::HubConfig;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,noetic_hub=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = HubConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Noetic Hub")
            .with_inner_size([1024.0, 768.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Noetic Hub",
        options,
        Box::new(move |cc| Ok(Box::new(HubApp::new(cc, config)))),
    )
}
