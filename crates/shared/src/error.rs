use thiserror::Error;

use crate::domain::Fps;

/// Input problems caught before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a video file")]
    MissingFile,
    #[error("FPS must be between {} and {}", Fps::MIN, Fps::MAX)]
    FpsOutOfRange { value: i64 },
    #[error("FPS must be between {} and {}", Fps::MIN, Fps::MAX)]
    FpsNotANumber { raw: String },
}
