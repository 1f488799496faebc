mod app;
mod chart;
mod color;
mod config;
mod data;
mod report;
mod state;
mod ui;

use anyhow::Context;
use app::NfhsDashboardApp;
use config::DashboardConfig;
use data::store::DataStore;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env();
    let store = DataStore::global(&config.data_path);
    log::info!("Using data file {}", store.source().display());

    // Load before opening the window: without data there is nothing to show.
    let dataset = store.load().context("cannot start dashboard")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 840.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NFHS India Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(NfhsDashboardApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
