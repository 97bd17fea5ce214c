use super::UploadError;
use reqwest::multipart;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};

pub const REMOVE_BG_URL: &str = "https://api.remove.bg/v1.0/removebg";

const OUTPUT_SUFFIX: &str = "_no_bg";

#[derive(Clone)]
pub struct BackgroundRemover {
    client: reqwest::Client,
    endpoint: String,
}

impl BackgroundRemover {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// `shot.jpg` becomes `shot_no_bg.png` in the same directory.
    pub fn output_path(path: &Path) -> PathBuf {
        let stem = path.file_stem().unwrap_or_default().to_string_lossy();
        path.with_file_name(format!("{}{}.png", stem, OUTPUT_SUFFIX))
    }

    pub fn is_output(path: &Path) -> bool {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .map_or(false, |stem| stem.ends_with(OUTPUT_SUFFIX))
    }

    /// Returns the path of the background-free copy.
    pub async fn remove(&self, path: &Path, api_key: &str) -> Result<PathBuf, UploadError> {
        if api_key.is_empty() {
            return Err(UploadError::MissingApiKey);
        }

        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content = tokio::fs::read(path).await?;
        log::info!("Removing background from {}", file_name);

        let form = multipart::Form::new()
            .part("image_file", multipart::Part::bytes(content).file_name(file_name));

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Api-Key", api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let image = response.bytes().await?;
        let output = Self::output_path(path);
        tokio::fs::write(&output, &image).await?;
        log::info!("Background removed: {}", output.display());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_sits_next_to_input() {
        assert_eq!(
            BackgroundRemover::output_path(Path::new("/shots/capture.jpg")),
            PathBuf::from("/shots/capture_no_bg.png")
        );
        assert_eq!(
            BackgroundRemover::output_path(Path::new("/shots/capture.png")),
            PathBuf::from("/shots/capture_no_bg.png")
        );
    }

    #[test]
    fn recognises_its_own_output() {
        assert!(BackgroundRemover::is_output(Path::new("/shots/capture_no_bg.png")));
        assert!(!BackgroundRemover::is_output(Path::new("/shots/capture.png")));
        assert!(!BackgroundRemover::is_output(Path::new("/shots/no_bg")));
    }

    #[tokio::test]
    async fn empty_key_fails_before_any_request() {
        let remover = BackgroundRemover::new(reqwest::Client::new(), "http://127.0.0.1:9/");
        let result = remover.remove(Path::new("/does/not/exist.png"), "").await;
        assert!(matches!(result, Err(UploadError::MissingApiKey)));
    }
}
