use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Name the processed archive is saved under.
pub const ARCHIVE_FILENAME: &str = "colmap_project.zip";

const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Frame extraction rate accepted by the processing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fps(u32);

impl Fps {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 120;

    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(ValidationError::FpsOutOfRange { value });
        }
        Ok(Self(value as u32))
    }

    /// Parses user-entered text. Surrounding whitespace is ignored, anything
    /// other than a whole number is rejected.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| ValidationError::FpsNotANumber {
                raw: trimmed.to_string(),
            })?;
        Self::new(value)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Fps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A video chosen by the user. Only metadata is held; the bytes are read
/// when the upload starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVideo {
    pub path: PathBuf,
    pub filename: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl SelectedVideo {
    /// One-line summary shown next to the file picker.
    pub fn info_line(&self) -> String {
        let size_mb = self.size_bytes as f64 / (1024.0 * 1024.0);
        format!("📄 {} ({size_mb:.2} MB)", self.filename)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiStatus {
    #[default]
    Idle,
    Uploading,
    Success,
    Error,
}

/// Renders a byte count with 1024-based units, e.g. `1536` -> `"1.5 KB"`.
///
/// Values are rounded to `decimals` places with trailing zeros dropped.
/// Anything past gigabytes stays in `GB`.
pub fn format_bytes(bytes: u64, decimals: i32) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < BYTE_UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let decimals = decimals.max(0) as usize;
    let value = bytes as f64 / scale as f64;
    let text = format!("{value:.decimals$}");
    let compact = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    format!("{compact} {}", BYTE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_sizes_on_binary_boundaries() {
        assert_eq!(format_bytes(0, 2), "0 Bytes");
        assert_eq!(format_bytes(1, 2), "1 Bytes");
        assert_eq!(format_bytes(1023, 2), "1023 Bytes");
        assert_eq!(format_bytes(1024, 2), "1 KB");
        assert_eq!(format_bytes(1536, 2), "1.5 KB");
        assert_eq!(format_bytes(1_048_576, 2), "1 MB");
        assert_eq!(format_bytes(1_572_864, 2), "1.5 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024, 2), "3 GB");
    }

    #[test]
    fn rounds_to_requested_decimals() {
        assert_eq!(format_bytes(1100, 2), "1.07 KB");
        assert_eq!(format_bytes(1100, 0), "1 KB");
        assert_eq!(format_bytes(1100, -3), "1 KB");
    }

    #[test]
    fn sizes_beyond_gigabytes_stay_in_gb() {
        assert_eq!(format_bytes(2 * 1024 * 1024 * 1024 * 1024, 2), "2048 GB");
    }

    #[test]
    fn fps_accepts_inclusive_bounds() {
        assert_eq!(Fps::parse("1").map(Fps::get), Ok(1));
        assert_eq!(Fps::parse(" 120 ").map(Fps::get), Ok(120));
    }

    #[test]
    fn fps_rejects_out_of_range_and_garbage() {
        assert_eq!(
            Fps::parse("0"),
            Err(ValidationError::FpsOutOfRange { value: 0 })
        );
        assert_eq!(
            Fps::parse("121"),
            Err(ValidationError::FpsOutOfRange { value: 121 })
        );
        assert!(matches!(
            Fps::parse(""),
            Err(ValidationError::FpsNotANumber { .. })
        ));
        assert!(matches!(
            Fps::parse("2.5"),
            Err(ValidationError::FpsNotANumber { .. })
        ));
    }

    #[test]
    fn validation_messages_name_the_range() {
        let err = Fps::parse("500").expect_err("out of range");
        assert_eq!(err.to_string(), "FPS must be between 1 and 120");
        let err = Fps::parse("fast").expect_err("not a number");
        assert_eq!(err.to_string(), "FPS must be between 1 and 120");
    }

    #[test]
    fn info_line_reports_megabytes_with_two_decimals() {
        let video = SelectedVideo {
            path: PathBuf::from("/tmp/clip.mp4"),
            filename: "clip.mp4".to_string(),
            size_bytes: 3 * 1024 * 1024 + 512 * 1024,
            mime_type: "video/mp4".to_string(),
        };
        assert_eq!(video.info_line(), "📄 clip.mp4 (3.50 MB)");
    }
}
