use super::UploadError;
use crate::utils::file_size::format_size;
use reqwest::multipart;
use std::path::Path;

pub const CATBOX_API_URL: &str = "https://catbox.moe/user/api.php";

#[derive(Clone)]
pub struct CatboxUploader {
    client: reqwest::Client,
    endpoint: String,
}

impl CatboxUploader {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Uploads `path` and returns the public link.
    pub async fn upload(&self, path: &Path) -> Result<String, UploadError> {
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content = tokio::fs::read(path).await?;
        log::info!(
            "Uploading {} ({})",
            file_name,
            format_size(content.len() as u64)
        );

        let form = multipart::Form::new()
            .text("reqtype", "fileupload")
            .part("fileToUpload", multipart::Part::bytes(content).file_name(file_name));

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_response(status, &body)
    }
}

/// Catbox answers a successful upload with the bare file URL.
pub fn parse_response(status: u16, body: &str) -> Result<String, UploadError> {
    if status != 200 {
        return Err(UploadError::Status {
            status,
            body: body.to_string(),
        });
    }

    let url = body.trim();
    if !url.starts_with("https") {
        return Err(UploadError::MalformedResponse(body.to_string()));
    }

    Ok(url.to_string())
}
