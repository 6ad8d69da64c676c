mod app;
mod color;
mod state;
mod ui;

use app::ScreentimeApp;
use eframe::egui;
use screentime_viewer::config::ViewerConfig;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match ViewerConfig::load_from_env() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            log::error!("Ignoring configuration: {e:#}");
            ViewerConfig::default()
        }
    };

    let mut state = AppState::new(config);
    if let Some(path) = state.config.dataset_path.clone() {
        state.load_from(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 650.0])
            .with_min_inner_size([500.0, 350.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Indian Kids Screentime 2025",
        options,
        Box::new(|_cc| Ok(Box::new(ScreentimeApp::new(state)))),
    )
}
