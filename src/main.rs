use std::path::PathBuf;

use anyhow::Context;
use eframe::egui;
use salary_explorer::app::SalaryExplorerApp;
use salary_explorer::config::DashboardConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut config = DashboardConfig::from_env().context("loading configuration")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = Some(PathBuf::from(path));
    }
    log::info!(
        "Starting with top_n={}, histogram_bins={}, target_role={:?}",
        config.top_n,
        config.histogram_bins,
        config.target_role
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Salary Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(SalaryExplorerApp::new(config)))),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer: {e}"))
}
