use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::{Fps, SelectedVideo},
    protocol::{
        ErrorDetail, HealthResponse, StatusResponse, FPS_FIELD, HEALTH_PATH, PROCESS_PATH,
        STATUS_PATH, VIDEO_FIELD,
    },
};
use thiserror::Error;
use tracing::{info, warn};

pub mod config;
pub mod controller;
pub mod download;
pub mod view;

pub use config::{load_settings, ClientSettings};
pub use controller::{SubmitOutcome, UploadController};
pub use download::{DirectorySink, DownloadSink};
pub use view::UploadView;

/// Message used when the backend rejects a job without saying why.
pub const GENERIC_FAILURE: &str = "Processing failed";

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("failed to read video '{}': {source}", .path.display())]
    ReadVideo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Backend operations the upload controller depends on.
#[async_trait]
pub trait ProcessingBackend: Send + Sync {
    /// Uploads the video and returns the archive bytes produced by the
    /// pipeline.
    async fn process_video(
        &self,
        video: &SelectedVideo,
        fps: Fps,
    ) -> Result<Vec<u8>, SubmissionError>;
    async fn pipeline_status(&self) -> Result<StatusResponse>;
    async fn health(&self) -> Result<HealthResponse>;
}

/// HTTP client for the video processing service.
#[derive(Clone)]
pub struct ProcessingClient {
    http: Client,
    server_url: String,
}

impl ProcessingClient {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self::with_http(Client::new(), server_url)
    }

    pub fn with_http(http: Client, server_url: impl Into<String>) -> Self {
        let server_url = server_url.into().trim().trim_end_matches('/').to_string();
        Self { http, server_url }
    }

    /// Builds a client from settings. No timeout is applied unless one is
    /// configured.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;
        Ok(Self::with_http(http, settings.server_url.clone()))
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }
}

#[async_trait]
impl ProcessingBackend for ProcessingClient {
    async fn process_video(
        &self,
        video: &SelectedVideo,
        fps: Fps,
    ) -> Result<Vec<u8>, SubmissionError> {
        let bytes = tokio::fs::read(&video.path)
            .await
            .map_err(|source| SubmissionError::ReadVideo {
                path: video.path.clone(),
                source,
            })?;
        info!(
            filename = %video.filename,
            size_bytes = bytes.len(),
            fps = fps.get(),
            "uploading video for processing"
        );

        let part = Part::bytes(bytes)
            .file_name(video.filename.clone())
            .mime_str(&video.mime_type)?;
        let form = Form::new()
            .part(VIDEO_FIELD, part)
            .text(FPS_FIELD, fps.to_string());

        let response = self
            .http
            .post(self.endpoint(PROCESS_PATH))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = serde_json::from_slice::<ErrorDetail>(&body)
                .ok()
                .and_then(|detail| detail.message())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            warn!(status = status.as_u16(), %message, "processing request rejected");
            return Err(SubmissionError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn pipeline_status(&self) -> Result<StatusResponse> {
        let status = self
            .http
            .get(self.endpoint(STATUS_PATH))
            .send()
            .await
            .context("status request failed")?
            .json()
            .await
            .context("status response was not valid JSON")?;
        Ok(status)
    }

    async fn health(&self) -> Result<HealthResponse> {
        let health = self
            .http
            .get(self.endpoint(HEALTH_PATH))
            .send()
            .await
            .context("health request failed")?
            .error_for_status()?
            .json()
            .await
            .context("health response was not valid JSON")?;
        Ok(health)
    }
}

/// Reads file metadata for `path` and guesses its MIME type from the
/// extension.
pub fn select_video(path: impl AsRef<Path>) -> Result<SelectedVideo> {
    let path = path.as_ref();
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("failed to inspect '{}'", path.display()))?;
    if !metadata.is_file() {
        bail!("'{}' is not a file", path.display());
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string();

    Ok(SelectedVideo {
        path: path.to_path_buf(),
        filename,
        size_bytes: metadata.len(),
        mime_type,
    })
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
