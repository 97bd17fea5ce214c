//! Watching the screenshot folder.
//!
//! `notify` delivers raw events onto a channel; a dedicated thread turns
//! file creations into [`ScreenshotEvent`]s, one at a time. Dropping the
//! [`DirectoryWatcher`] closes the channel and lets that thread finish.

use crate::app::history::LOG_FILE_NAME;
use crate::upload::{filter, BackgroundRemover, ScreenshotEvent};
use notify::event::CreateKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Time given to the capturing application to finish writing the file.
pub const SETTLE_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("Watch directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("Failed to watch directory: {0}")]
    Notify(#[from] notify::Error),

    #[error("Failed to start watcher thread: {0}")]
    Io(#[from] std::io::Error),
}

pub struct DirectoryWatcher {
    directory: PathBuf,
    _watcher: RecommendedWatcher,
}

impl DirectoryWatcher {
    pub fn spawn<F>(directory: &Path, settle_delay: Duration, mut on_screenshot: F) -> Result<Self, WatchError>
    where
        F: FnMut(ScreenshotEvent) + Send + 'static,
    {
        if !directory.is_dir() {
            return Err(WatchError::MissingDirectory(directory.to_path_buf()));
        }

        let (sender, receiver) = mpsc::channel::<notify::Result<Event>>();
        let mut watcher = notify::recommended_watcher(sender)?;
        watcher.watch(directory, RecursiveMode::NonRecursive)?;

        thread::Builder::new()
            .name("screenshot-watcher".to_string())
            .spawn(move || {
                for result in receiver {
                    let event = match result {
                        Ok(event) => event,
                        Err(e) => {
                            log::warn!("Watch error: {}", e);
                            continue;
                        }
                    };

                    for path in created_files(&event) {
                        log::info!("New file detected: {}", path.display());
                        thread::sleep(settle_delay);
                        if let Some(screenshot) = filter::check(&path) {
                            on_screenshot(screenshot);
                        }
                    }
                }
                log::debug!("Watcher thread finished");
            })?;

        log::info!("Watching directory: {}", directory.display());
        Ok(Self {
            directory: directory.to_path_buf(),
            _watcher: watcher,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// Regular files created by something other than this application.
pub fn created_files(event: &Event) -> Vec<PathBuf> {
    if !matches!(
        event.kind,
        EventKind::Create(CreateKind::File) | EventKind::Create(CreateKind::Any)
    ) {
        return Vec::new();
    }

    event
        .paths
        .iter()
        .filter(|path| path.is_file() && !is_own_output(path))
        .cloned()
        .collect()
}

fn is_own_output(path: &Path) -> bool {
    BackgroundRemover::is_output(path)
        || path.file_name().map_or(false, |name| name == LOG_FILE_NAME)
}
