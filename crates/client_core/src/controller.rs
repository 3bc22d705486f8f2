//! Upload form logic: validation, the single processing request, saving the
//! archive and the startup status check.

use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex, PoisonError,
    },
};

use anyhow::Result;
use shared::{
    domain::{format_bytes, Fps, SelectedVideo, StatusKind, UiStatus, ARCHIVE_FILENAME},
    error::ValidationError,
    protocol::StatusResponse,
};
use tracing::{debug, error, info, warn};

use crate::{download::DownloadSink, view::UploadView, ProcessingBackend};

const UPLOADING_TEXT: &str = "Uploading video...";
const PREPARING_DOWNLOAD_TEXT: &str = "Processing complete! Preparing download...";
const PIPELINE_WARNING: &str = "⚠️ Warning: Pipeline script not found. Processing may fail.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was invalid; nothing was sent.
    Rejected(ValidationError),
    /// Another submission from this controller is still in flight.
    Busy,
    Completed { saved_to: PathBuf, size_bytes: u64 },
    Failed { message: String },
}

pub struct UploadController {
    backend: Arc<dyn ProcessingBackend>,
    view: Arc<dyn UploadView>,
    sink: Arc<dyn DownloadSink>,
    busy: AtomicBool,
    status: Mutex<UiStatus>,
}

impl UploadController {
    pub fn new(
        backend: Arc<dyn ProcessingBackend>,
        view: Arc<dyn UploadView>,
        sink: Arc<dyn DownloadSink>,
    ) -> Self {
        Self {
            backend,
            view,
            sink,
            busy: AtomicBool::new(false),
            status: Mutex::new(UiStatus::Idle),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Outcome currently reflected on screen.
    pub fn ui_status(&self) -> UiStatus {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_ui_status(&self, status: UiStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }

    pub fn on_file_selected(&self, video: Option<&SelectedVideo>) {
        let info = video.map(SelectedVideo::info_line);
        self.view.show_file_info(info.as_deref());
    }

    /// Validates the form and, when it is acceptable, uploads the video and
    /// saves the returned archive.
    ///
    /// Failures are shown through the view and summarized in the returned
    /// outcome; this never errors. The submit control is restored on every
    /// path that disabled it.
    pub async fn submit(&self, video: Option<&SelectedVideo>, fps_raw: &str) -> SubmitOutcome {
        let Some(_claim) = BusyClaim::acquire(&self.busy) else {
            debug!("submission ignored: request already in flight");
            return SubmitOutcome::Busy;
        };

        let (video, fps) = match validate(video, fps_raw) {
            Ok(valid) => valid,
            Err(err) => {
                info!(reason = %err, "submission rejected");
                self.view.show_status(&format!("❌ {err}"), StatusKind::Error);
                self.set_ui_status(UiStatus::Idle);
                return SubmitOutcome::Rejected(err);
            }
        };

        self.view.set_button_loading(true);
        let _loading = LoadingGuard {
            view: self.view.as_ref(),
        };
        self.view.hide_status();
        self.view.show_progress(UPLOADING_TEXT);
        self.set_ui_status(UiStatus::Uploading);

        match self.upload_and_save(video, fps).await {
            Ok((saved_to, size_bytes)) => {
                let size = format_bytes(size_bytes, 2);
                info!(path = %saved_to.display(), %size, "processing complete");
                self.view.show_status(
                    &format!("✅ Processing complete! Downloaded {ARCHIVE_FILENAME} ({size})"),
                    StatusKind::Success,
                );
                self.view.hide_progress();
                self.set_ui_status(UiStatus::Success);
                SubmitOutcome::Completed {
                    saved_to,
                    size_bytes,
                }
            }
            Err(err) => {
                error!("processing error: {err:#}");
                let message = err.to_string();
                self.view
                    .show_status(&format!("❌ Error: {message}"), StatusKind::Error);
                self.view.hide_progress();
                self.set_ui_status(UiStatus::Error);
                SubmitOutcome::Failed { message }
            }
        }
    }

    async fn upload_and_save(&self, video: &SelectedVideo, fps: Fps) -> Result<(PathBuf, u64)> {
        let archive = self.backend.process_video(video, fps).await?;
        self.view.set_progress_text(PREPARING_DOWNLOAD_TEXT);

        let size_bytes = archive.len() as u64;
        let saved_to = self.sink.save(ARCHIVE_FILENAME, &archive).await?;
        Ok((saved_to, size_bytes))
    }

    /// Asks the backend whether its pipeline is usable and warns when it is
    /// not. A failed check is only logged.
    pub async fn check_status(&self) -> Option<StatusResponse> {
        match self.backend.pipeline_status().await {
            Ok(status) => {
                if !status.is_pipeline_available() {
                    warn!("backend reports pipeline unavailable");
                    self.view.show_status(PIPELINE_WARNING, StatusKind::Error);
                }
                Some(status)
            }
            Err(err) => {
                error!("status check failed: {err:#}");
                None
            }
        }
    }
}

fn validate<'a>(
    video: Option<&'a SelectedVideo>,
    fps_raw: &str,
) -> Result<(&'a SelectedVideo, Fps), ValidationError> {
    let video = video.ok_or(ValidationError::MissingFile)?;
    let fps = Fps::parse(fps_raw)?;
    Ok((video, fps))
}

struct BusyClaim<'a> {
    busy: &'a AtomicBool,
}

impl<'a> BusyClaim<'a> {
    fn acquire(busy: &'a AtomicBool) -> Option<Self> {
        busy.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { busy })
    }
}

impl Drop for BusyClaim<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

struct LoadingGuard<'a> {
    view: &'a dyn UploadView,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.view.set_button_loading(false);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
