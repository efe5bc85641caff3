//! Airbnb Listings Dashboard - interactive price charts over a listings CSV.

use airbnb_dashboard::config::DashboardConfig;
use airbnb_dashboard::data;
use airbnb_dashboard::gui::DashboardApp;
use anyhow::Context;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::resolve(std::env::args().nth(1))
        .context("Failed to resolve dashboard configuration")?;

    // Load before opening the window; a missing or unreadable file is fatal
    let dataset = data::load(&config.data_path, &config.cleaning_options())
        .with_context(|| format!("Failed to load listings from {}", config.data_path.display()))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Airbnb Listings Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Airbnb Listings Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config, dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("Dashboard window failed: {e}"))
}
