//! Presentation seam between the upload controller and its host UI.

use shared::domain::StatusKind;

/// Everything the controller is allowed to change on screen.
///
/// Hosts receive calls from whichever task runs the controller, so
/// implementations hold their own interior mutability or forward the calls
/// over a channel.
pub trait UploadView: Send + Sync {
    fn show_status(&self, message: &str, kind: StatusKind);
    fn hide_status(&self);
    /// Shows the progress bar filled completely with `text` beneath it.
    fn show_progress(&self, text: &str);
    fn set_progress_text(&self, text: &str);
    fn hide_progress(&self);
    /// Disables the submit control and swaps its label while `loading`.
    fn set_button_loading(&self, loading: bool);
    /// `None` resets the picker to its empty prompt.
    fn show_file_info(&self, info: Option<&str>);
}
