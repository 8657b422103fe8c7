mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::GreenPathApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = config::load_config();
    log::info!("Dataset: {}", config.dataset_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "GreenPath",
        options,
        Box::new(move |_cc| Ok(Box::new(GreenPathApp::new(&config)))),
    )
}
