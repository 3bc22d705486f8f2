//! Backend commands queued from UI to backend worker.

use std::path::PathBuf;

#[derive(Debug)]
pub enum BackendCommand {
    SelectFile { path: PathBuf },
    ClearFile,
    Submit { fps: String },
    CheckStatus,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SelectFile { .. } => "select_file",
            BackendCommand::ClearFile => "clear_file",
            BackendCommand::Submit { .. } => "submit",
            BackendCommand::CheckStatus => "check_status",
        }
    }
}
