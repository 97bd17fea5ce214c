//! Owns the status channel and the currently running watcher.

use crate::config::SharedConfig;
use crate::upload::{Endpoints, PipelineMessage, ScreenshotPipeline};
use crate::watcher::{DirectoryWatcher, WatchError};
use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

/// The channel lives as long as the service, so a watcher that is being
/// replaced can still deliver what it had queued.
pub struct UploadService {
    config: SharedConfig,
    endpoints: Endpoints,
    settle_delay: Duration,
    status_sender: Sender<PipelineMessage>,
    status_receiver: Receiver<PipelineMessage>,
    watcher: Option<DirectoryWatcher>,
}

impl UploadService {
    pub fn new(config: SharedConfig, endpoints: Endpoints, settle_delay: Duration) -> Self {
        let (status_sender, status_receiver) = mpsc::channel();
        Self {
            config,
            endpoints,
            settle_delay,
            status_sender,
            status_receiver,
            watcher: None,
        }
    }

    /// Replaces any running watcher with one on `dir`.
    pub fn start(&mut self, dir: &Path) -> Result<(), WatchError> {
        self.stop();

        let handler = ScreenshotPipeline::new(
            self.config.clone(),
            self.endpoints.clone(),
            self.status_sender.clone(),
        )
        .into_handler()?;

        self.watcher = Some(DirectoryWatcher::spawn(dir, self.settle_delay, handler)?);
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(watcher) = self.watcher.take() {
            log::info!("Stopped watching {}", watcher.directory().display());
        }
    }

    pub fn watcher(&self) -> Option<&DirectoryWatcher> {
        self.watcher.as_ref()
    }

    pub fn try_recv(&self) -> Option<PipelineMessage> {
        self.status_receiver.try_recv().ok()
    }
}
