use super::history::{ClipboardSink, UploadHistory};
use crate::upload::{FileStatus, Notice, PipelineMessage, UploadStatus};
use std::collections::VecDeque;
use std::path::Path;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct UploadCounts {
    pub uploaded: usize,
    pub failed: usize,
}

/// Everything the UI shows that the pipeline thread can change.
#[derive(Default)]
pub struct UploadState {
    pub history: UploadHistory,
    pub file_statuses: Vec<FileStatus>,
    pub current_file: Option<String>,
    pub counts: UploadCounts,
    pub notices: VecDeque<Notice>,
}

impl UploadState {
    /// Applies one message from the pipeline. Only a successful upload
    /// touches the clipboard, the history or the log file.
    pub fn apply(
        &mut self,
        message: PipelineMessage,
        clipboard: Option<&mut dyn ClipboardSink>,
        log_dir: Option<&Path>,
    ) {
        let status = match message {
            PipelineMessage::Notice(notice) => {
                self.notices.push_back(notice);
                return;
            }
            PipelineMessage::Status(status) => status,
        };

        match &status.status {
            UploadStatus::Processing => {
                self.current_file = Some(status.name.clone());
            }
            UploadStatus::Uploaded(url) => {
                self.counts.uploaded += 1;
                self.current_file = None;
                self.history.record(url, clipboard, log_dir);
            }
            UploadStatus::Error(_) => {
                self.counts.failed += 1;
                self.current_file = None;
            }
            UploadStatus::Skipped(_) => {}
        }

        self.file_statuses.push(status);
    }

    pub fn notify(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    pub fn get_status_text(&self) -> String {
        match &self.current_file {
            Some(name) => format!("📤 Uploading {}", name),
            None if self.counts == UploadCounts::default() => "Waiting for screenshots".to_string(),
            None => format!(
                "✅ Uploaded: {} | ❌ Failed: {}",
                self.counts.uploaded, self.counts.failed
            ),
        }
    }
}
