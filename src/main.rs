mod app;
mod color;
mod data;
mod state;
mod ui;

use app::TunabilityApp;
use data::config::AnalysisConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match AnalysisConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring config, using defaults: {e:#}");
            AnalysisConfig::default()
        }
    };
    log::info!(
        "Frequency tolerance {:.1e}, {} target voltages",
        config.tol_freq_rel,
        config.target_voltages.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "C(V) Tunability Analysis",
        options,
        Box::new(|_cc| Ok(Box::new(TunabilityApp::new(AppState::with_config(config))))),
    )
}
