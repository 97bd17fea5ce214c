#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use catbox_uploader::app::{ScreenshotUploader, WINDOW_SIZE};
use catbox_uploader::config::ConfigStore;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let store = ConfigStore::default();
    let config = match store.load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Ignoring unreadable {}: {}", store.path().display(), e);
            Default::default()
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size(WINDOW_SIZE)
            .with_decorations(false)
            .with_transparent(true)
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        "Catbox Screenshot Uploader",
        options,
        Box::new(move |cc| Box::new(ScreenshotUploader::new(cc, store, config.into_shared()))),
    )
}
