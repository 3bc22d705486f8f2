use std::sync::Mutex;

use client_core::UploadView;
use shared::domain::StatusKind;

/// Renders controller updates as terminal lines.
#[derive(Default)]
pub struct TerminalView {
    progress_visible: Mutex<bool>,
}

impl TerminalView {
    fn set_progress_visible(&self, visible: bool) {
        if let Ok(mut flag) = self.progress_visible.lock() {
            *flag = visible;
        }
    }
}

impl UploadView for TerminalView {
    fn show_status(&self, message: &str, kind: StatusKind) {
        match kind {
            StatusKind::Success => println!("{message}"),
            StatusKind::Error => eprintln!("{message}"),
        }
    }

    fn hide_status(&self) {}

    fn show_progress(&self, text: &str) {
        self.set_progress_visible(true);
        println!("[####################] {text}");
    }

    fn set_progress_text(&self, text: &str) {
        let visible = self.progress_visible.lock().map(|flag| *flag).unwrap_or(true);
        if visible {
            println!("[####################] {text}");
        }
    }

    fn hide_progress(&self) {
        self.set_progress_visible(false);
    }

    fn set_button_loading(&self, loading: bool) {
        tracing::debug!(loading, "submit control state changed");
    }

    fn show_file_info(&self, info: Option<&str>) {
        match info {
            Some(info) => println!("{info}"),
            None => println!("No video selected"),
        }
    }
}
