mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::DinoDashApp;
use config::Config;
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load().context("reading configuration")?;

    // The dashboard cannot start without a canonical table.
    let dataset = data::loader::load_paths(&config.data_path, &config.country_codes_path)
        .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))?;
    let state = AppState::new(dataset, &config);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "DinoDash – Dinosaur Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(DinoDashApp::new(state)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
