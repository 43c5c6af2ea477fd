use eframe::egui;
use log::info;

use crate::config::Config;

use super::LassoApp;

pub fn run_native() -> Result<(), eframe::Error> {
    env_logger::init();

    let mut config =
        Config::load("config.json").map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;
    if let Some(image_path) = std::env::args().nth(1) {
        config.image_path = Some(image_path.into());
    }
    let canvas = config
        .load_canvas()
        .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config.viewport),
        ..Default::default()
    };

    info!("Run with config: {config:?}");
    eframe::run_native(
        "Lasso Pixels",
        options,
        Box::new(|cc| Ok(Box::new(LassoApp::new(cc, canvas, config.settings)))),
    )
}
