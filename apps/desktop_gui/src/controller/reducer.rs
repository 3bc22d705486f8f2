//! Form state and how backend events change it.

use shared::domain::StatusKind;

use crate::controller::events::UiEvent;

pub const FILE_PROMPT: &str = "Choose video file...";
pub const DEFAULT_FPS_INPUT: &str = "5";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub file_label: String,
    pub file_info: Option<String>,
    pub fps_input: String,
    pub status: Option<(String, StatusKind)>,
    /// Progress text while the (always full) bar is visible.
    pub progress: Option<String>,
    pub button_loading: bool,
    /// Footer line for worker and queue messages.
    pub info: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            file_label: FILE_PROMPT.to_string(),
            file_info: None,
            fps_input: DEFAULT_FPS_INPUT.to_string(),
            status: None,
            progress: None,
            button_loading: false,
            info: String::new(),
        }
    }
}

impl FormState {
    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => self.info = message,
            UiEvent::Status { message, kind } => self.status = Some((message, kind)),
            UiEvent::HideStatus => self.status = None,
            UiEvent::Progress(text) | UiEvent::ProgressText(text) => self.progress = Some(text),
            UiEvent::HideProgress => self.progress = None,
            UiEvent::ButtonLoading(loading) => self.button_loading = loading,
            UiEvent::FileChosen { filename } => self.file_label = filename,
            UiEvent::FileInfo(Some(info)) => self.file_info = Some(info),
            UiEvent::FileInfo(None) => {
                self.file_info = None;
                self.file_label = FILE_PROMPT.to_string();
            }
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.button_loading
    }

    pub fn button_text(&self) -> &'static str {
        if self.button_loading {
            "Processing..."
        } else {
            "Process Video"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_round_trip_restores_button() {
        let mut form = FormState::default();
        form.apply(UiEvent::Status {
            message: "stale".to_string(),
            kind: StatusKind::Error,
        });

        form.apply(UiEvent::ButtonLoading(true));
        form.apply(UiEvent::HideStatus);
        form.apply(UiEvent::Progress("Uploading video...".to_string()));
        assert!(!form.can_submit());
        assert_eq!(form.button_text(), "Processing...");
        assert_eq!(form.status, None);

        form.apply(UiEvent::ProgressText(
            "Processing complete! Preparing download...".to_string(),
        ));
        form.apply(UiEvent::Status {
            message: "✅ done".to_string(),
            kind: StatusKind::Success,
        });
        form.apply(UiEvent::HideProgress);
        form.apply(UiEvent::ButtonLoading(false));

        assert!(form.can_submit());
        assert_eq!(form.button_text(), "Process Video");
        assert_eq!(form.progress, None);
        assert_eq!(
            form.status,
            Some(("✅ done".to_string(), StatusKind::Success))
        );
    }

    #[test]
    fn clearing_file_resets_prompt() {
        let mut form = FormState::default();
        form.apply(UiEvent::FileChosen {
            filename: "clip.mp4".to_string(),
        });
        form.apply(UiEvent::FileInfo(Some("📄 clip.mp4 (1.00 MB)".to_string())));
        assert_eq!(form.file_label, "clip.mp4");

        form.apply(UiEvent::FileInfo(None));

        assert_eq!(form.file_label, FILE_PROMPT);
        assert_eq!(form.file_info, None);
    }
}
