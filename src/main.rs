//! Registry Dashboard - Resident Registration Population & Household Viewer
//!
//! Loads the monthly registry extract and shows regional charts and tables.

mod gui;

use anyhow::Context;
use eframe::egui;
use gui::DashboardApp;
use registry_dashboard::DashboardConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DashboardConfig::from_env().context("loading dashboard config")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Registry Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Registry Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
