pub mod history;
mod service;
mod state;
mod ui;

use crate::assets::{AssetResolver, BACKGROUND_IMAGE};
use crate::config::{ConfigStore, SharedConfig};
use crate::upload::{Endpoints, Notice};
use crate::watcher::SETTLE_DELAY;
use eframe::{egui, App};
use history::ClipboardSink;
pub use service::UploadService;
pub use state::{UploadCounts, UploadState};
use std::path::{Path, PathBuf};
use std::sync::PoisonError;
use std::time::Duration;

pub const WINDOW_SIZE: [f32; 2] = [800.0, 600.0];

pub struct ScreenshotUploader {
    config: SharedConfig,
    store: ConfigStore,
    service: UploadService,
    api_key_input: String,
    remove_bg_enabled: bool,
    state: UploadState,
    clipboard: Option<arboard::Clipboard>,
    background: Option<egui::TextureHandle>,
}

impl ScreenshotUploader {
    pub fn new(cc: &eframe::CreationContext<'_>, store: ConfigStore, config: SharedConfig) -> Self {
        log::info!("Initializing Catbox screenshot uploader");

        let (api_key_input, remove_bg_enabled) = {
            let config = config.lock().unwrap_or_else(PoisonError::into_inner);
            (config.remove_bg_api_key.clone(), config.remove_bg_enabled)
        };

        let clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::error!("Clipboard unavailable, links won't be copied: {}", e);
                None
            }
        };

        let background = load_background(&AssetResolver::from_env().resolve(BACKGROUND_IMAGE))
            .map(|image| {
                cc.egui_ctx
                    .load_texture("background", image, egui::TextureOptions::LINEAR)
            });

        let service = UploadService::new(config.clone(), Endpoints::default(), SETTLE_DELAY);
        let mut app = Self {
            config,
            store,
            service,
            api_key_input,
            remove_bg_enabled,
            state: UploadState::default(),
            clipboard,
            background,
        };

        if app.watch_dir().is_none() {
            match pick_folder() {
                Some(dir) => app.set_watch_directory(dir),
                None => log::warn!("No screenshot folder selected, not watching anything"),
            }
        }
        app.start_watcher();
        app
    }

    fn watch_dir(&self) -> Option<PathBuf> {
        let config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        config.watch_dir().map(Path::to_path_buf)
    }

    /// Replaces any running watcher with one on the configured directory.
    pub fn start_watcher(&mut self) {
        let Some(dir) = self.watch_dir() else {
            self.service.stop();
            return;
        };

        if let Err(e) = self.service.start(&dir) {
            log::error!("Error: {}", e);
            self.state.notify(Notice::error("Error", e.to_string()));
        }
    }

    fn set_watch_directory(&mut self, dir: PathBuf) {
        let snapshot = {
            let mut config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
            config.watch_directory = dir;
            config.clone()
        };

        if let Err(e) = self.store.save(&snapshot) {
            log::error!("Failed to save configuration: {}", e);
            self.state.notify(Notice::error("Error", e.to_string()));
        }
    }

    pub fn change_directory(&mut self) {
        let Some(dir) = pick_folder() else {
            return;
        };

        let message = format!("Now watching: {}", dir.display());
        self.set_watch_directory(dir);
        self.start_watcher();
        self.state.notify(Notice::info("Directory Changed", message));
    }

    /// Keeps the pipeline on the key being typed; only saving writes it out.
    pub fn api_key_changed(&mut self) {
        let mut config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
        config.remove_bg_api_key = self.api_key_input.clone();
    }

    pub fn save_settings(&mut self) {
        let snapshot = {
            let mut config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
            config.remove_bg_api_key = self.api_key_input.clone();
            config.remove_bg_enabled = self.remove_bg_enabled;
            config.clone()
        };

        match self.store.save(&snapshot) {
            Ok(()) => self
                .state
                .notify(Notice::info("Settings Saved", "Your settings have been saved.")),
            Err(e) => {
                log::error!("Failed to save settings: {}", e);
                self.state.notify(Notice::error("Error", e.to_string()));
            }
        }
    }

    /// Drains everything the pipeline reported since the last frame.
    pub fn update_state(&mut self, ctx: &egui::Context) {
        let log_dir = self.watch_dir();
        let mut had_updates = false;
        while let Some(message) = self.service.try_recv() {
            had_updates = true;
            let clipboard = self
                .clipboard
                .as_mut()
                .map(|clipboard| clipboard as &mut dyn ClipboardSink);
            self.state.apply(message, clipboard, log_dir.as_deref());
        }

        if had_updates {
            ctx.request_repaint();
        }
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

impl App for ScreenshotUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }
}

fn pick_folder() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Select Screenshot Folder")
        .pick_folder()
}

fn load_background(path: &Path) -> Option<egui::ColorImage> {
    let image = match image::open(path) {
        Ok(image) => image.to_rgba8(),
        Err(e) => {
            log::warn!("No background image at {}: {}", path.display(), e);
            return None;
        }
    };

    let size = [image.width() as usize, image.height() as usize];
    Some(egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw()))
}
