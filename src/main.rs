mod analytics;
mod app;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use app::StrokeDashApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;

    // The one load of the process; the table is read-only from here on.
    let table = match data::loader::load_file(&config.dataset_path) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            log::error!("Failed to load dataset: {e}");
            return Err(e).with_context(|| {
                format!("loading dataset {}", config.dataset_path.display())
            });
        }
    };

    if table.is_empty() {
        log::warn!("{} has no rows", config.dataset_path.display());
    }

    let state = AppState::new(table, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Stroke Dash – Patient Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(StrokeDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the UI: {e}"))
}
