use crate::upload::UploadError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const LOG_FILE_NAME: &str = "catbox_links.txt";

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), UploadError>;
}

impl ClipboardSink for arboard::Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), UploadError> {
        arboard::Clipboard::set_text(self, text.to_string())
            .map_err(|e| UploadError::Clipboard(e.to_string()))
    }
}

/// Links uploaded during this session, oldest first.
#[derive(Debug, Default)]
pub struct UploadHistory {
    entries: Vec<String>,
}

impl UploadHistory {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Clipboard, list, then the log file in the watched directory. A failing
    /// clipboard or log write is logged and doesn't stop the other steps.
    pub fn record(
        &mut self,
        url: &str,
        clipboard: Option<&mut dyn ClipboardSink>,
        log_dir: Option<&Path>,
    ) {
        match clipboard {
            Some(clipboard) => {
                if let Err(e) = clipboard.set_text(url) {
                    log::error!("Failed to copy link: {}", e);
                }
            }
            None => log::warn!("No clipboard available, link not copied"),
        }

        self.entries.push(url.to_string());

        if let Some(dir) = log_dir {
            if let Err(e) = append_line(&dir.join(LOG_FILE_NAME), url) {
                log::error!("Failed to write {} in {}: {}", LOG_FILE_NAME, dir.display(), e);
            }
        }
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)
}
