//! Hoopscope - NBA Historical Analytics Dashboard
//!
//! Usage: `hoopscope [DATA_DIR]`

use eframe::egui;
use hoopscope::config::DashboardConfig;
use hoopscope::gui::DashboardApp;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let mut config = DashboardConfig::discover()?;
    if let Some(dir) = std::env::args_os().nth(1) {
        config.data_dir = PathBuf::from(dir);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();
    tracing::info!(data_dir = %config.data_dir.display(), "starting dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("NBA Analytics Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "NBA Analytics Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
