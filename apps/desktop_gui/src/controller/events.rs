//! Events flowing from the backend worker to the UI thread.

use client_core::UploadView;
use crossbeam_channel::{Sender, TrySendError};
use shared::domain::StatusKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Info(String),
    Status { message: String, kind: StatusKind },
    HideStatus,
    Progress(String),
    ProgressText(String),
    HideProgress,
    ButtonLoading(bool),
    FileChosen { filename: String },
    FileInfo(Option<String>),
}

/// [`UploadView`] that forwards every call to the UI thread.
#[derive(Clone)]
pub struct ChannelView {
    ui_tx: Sender<UiEvent>,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }

    pub fn send(&self, event: UiEvent) {
        match self.ui_tx.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(?event, "ui event queue full; dropping event");
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui closed; dropping event");
            }
        }
    }
}

impl UploadView for ChannelView {
    fn show_status(&self, message: &str, kind: StatusKind) {
        self.send(UiEvent::Status {
            message: message.to_string(),
            kind,
        });
    }

    fn hide_status(&self) {
        self.send(UiEvent::HideStatus);
    }

    fn show_progress(&self, text: &str) {
        self.send(UiEvent::Progress(text.to_string()));
    }

    fn set_progress_text(&self, text: &str) {
        self.send(UiEvent::ProgressText(text.to_string()));
    }

    fn hide_progress(&self) {
        self.send(UiEvent::HideProgress);
    }

    fn set_button_loading(&self, loading: bool) {
        self.send(UiEvent::ButtonLoading(loading));
    }

    fn show_file_info(&self, info: Option<&str>) {
        self.send(UiEvent::FileInfo(info.map(str::to_string)));
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn view_calls_become_ui_events() {
        let (tx, rx) = bounded(8);
        let view = ChannelView::new(tx);

        view.set_button_loading(true);
        view.show_progress("Uploading video...");
        view.show_status("❌ Error: bad codec", StatusKind::Error);

        assert_eq!(rx.try_recv(), Ok(UiEvent::ButtonLoading(true)));
        assert_eq!(
            rx.try_recv(),
            Ok(UiEvent::Progress("Uploading video...".to_string()))
        );
        assert_eq!(
            rx.try_recv(),
            Ok(UiEvent::Status {
                message: "❌ Error: bad codec".to_string(),
                kind: StatusKind::Error,
            })
        );
    }

    #[test]
    fn full_or_closed_queue_does_not_panic() {
        let (tx, rx) = bounded(1);
        let view = ChannelView::new(tx);

        view.hide_status();
        view.hide_progress();
        assert_eq!(rx.len(), 1);

        drop(rx);
        view.set_button_loading(false);
    }
}
