use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum UploadStatus {
    Processing,
    Uploaded(String),
    Error(String),
    Skipped(String),
}

#[derive(Debug, Clone)]
pub struct FileStatus {
    pub name: String,
    pub status: UploadStatus,
}

impl FileStatus {
    pub fn new(path: &std::path::Path, status: UploadStatus) -> Self {
        Self {
            name: path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            status,
        }
    }
}

/// A file that passed the screenshot filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotEvent {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Everything the pipeline thread reports back to the UI loop.
#[derive(Debug, Clone)]
pub enum PipelineMessage {
    Status(FileStatus),
    Notice(Notice),
}
