//! Swiss Power Plants Dashboard
//!
//! Loads the Swiss renewable power plant register and canton boundaries, then
//! shows a choropleth, a pie chart, a line chart and a scatter map.

mod charts;
mod config;
mod data;
mod gui;

use config::DashboardConfig;
use eframe::egui;
use gui::DashboardApp;

fn main() -> eframe::Result<()> {
    // Initialize tracing (respects RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = DashboardConfig::load_or_default();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title("Swiss Power Plants"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Swiss Power Plants",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
