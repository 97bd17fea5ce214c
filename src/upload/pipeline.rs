use super::catbox::CATBOX_API_URL;
use super::remove_bg::REMOVE_BG_URL;
use super::{
    BackgroundRemover, CatboxUploader, FileStatus, Notice, PipelineMessage, ScreenshotEvent,
    UploadError, UploadStatus,
};
use crate::config::SharedConfig;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::PoisonError;

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub remove_bg: String,
    pub catbox: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            remove_bg: REMOVE_BG_URL.to_string(),
            catbox: CATBOX_API_URL.to_string(),
        }
    }
}

/// Detect → (optional) background removal → upload, one screenshot at a time.
///
/// Nothing here touches UI state: every outcome goes out on `status_sender`
/// and the UI loop records it.
#[derive(Clone)]
pub struct ScreenshotPipeline {
    config: SharedConfig,
    remover: BackgroundRemover,
    uploader: CatboxUploader,
    status_sender: Sender<PipelineMessage>,
}

impl ScreenshotPipeline {
    pub fn new(
        config: SharedConfig,
        endpoints: Endpoints,
        status_sender: Sender<PipelineMessage>,
    ) -> Self {
        let client = reqwest::Client::new();
        Self {
            config,
            remover: BackgroundRemover::new(client.clone(), endpoints.remove_bg),
            uploader: CatboxUploader::new(client, endpoints.catbox),
            status_sender,
        }
    }

    /// Returns the uploaded link, or `None` when the upload failed.
    pub async fn process(&self, event: &ScreenshotEvent) -> Option<String> {
        log::info!(
            "Processing {} ({}x{})",
            event.path.display(),
            event.width,
            event.height
        );
        self.send_status(&event.path, UploadStatus::Processing);

        let (remove_bg_enabled, api_key) = {
            let config = self.config.lock().unwrap_or_else(PoisonError::into_inner);
            (config.remove_bg_enabled, config.remove_bg_api_key.clone())
        };

        let path = if remove_bg_enabled {
            self.remove_background(&event.path, &api_key).await
        } else {
            event.path.clone()
        };

        match self.uploader.upload(&path).await {
            Ok(url) => {
                log::info!("Uploaded to Catbox: {}", url);
                self.send_status(&path, UploadStatus::Uploaded(url.clone()));
                Some(url)
            }
            Err(e) => {
                log::error!("Failed to upload {}: {}", path.display(), e);
                self.send_status(&path, UploadStatus::Error(e.to_string()));
                None
            }
        }
    }

    /// Falls back to the original file whenever removal doesn't work out.
    async fn remove_background(&self, path: &Path, api_key: &str) -> PathBuf {
        match self.remover.remove(path, api_key).await {
            Ok(output) => output,
            Err(UploadError::MissingApiKey) => {
                log::warn!("Background removal enabled without an API key");
                self.status_sender
                    .send(PipelineMessage::Notice(Notice::error(
                        "Error",
                        UploadError::MissingApiKey.to_string(),
                    )))
                    .unwrap_or_default();
                self.send_status(
                    path,
                    UploadStatus::Skipped("Background removal skipped: no API key".to_string()),
                );
                path.to_path_buf()
            }
            Err(e) => {
                log::error!("Error from remove.bg: {}", e);
                path.to_path_buf()
            }
        }
    }

    /// Drives the async pipeline from a plain thread, one event per call.
    pub fn into_handler(self) -> std::io::Result<impl FnMut(ScreenshotEvent) + Send + 'static> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(move |event: ScreenshotEvent| {
            runtime.block_on(self.process(&event));
        })
    }

    fn send_status(&self, path: &Path, status: UploadStatus) {
        self.status_sender
            .send(PipelineMessage::Status(FileStatus::new(path, status)))
            .unwrap_or_default();
    }
}
