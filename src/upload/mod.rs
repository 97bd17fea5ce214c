pub mod catbox;
pub mod filter;
mod pipeline;
pub mod remove_bg;
mod types;

pub use catbox::CatboxUploader;
pub use pipeline::{Endpoints, ScreenshotPipeline};
pub use remove_bg::BackgroundRemover;
pub use types::{FileStatus, Notice, NoticeLevel, PipelineMessage, ScreenshotEvent, UploadStatus};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Please provide a remove.bg API key.")]
    MissingApiKey,

    #[error("Failed to read or write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to send request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    MalformedResponse(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}
