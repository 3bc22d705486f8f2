use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PROCESS_PATH: &str = "/api/process";
pub const STATUS_PATH: &str = "/api/status";
pub const HEALTH_PATH: &str = "/health";

/// Multipart field carrying the video bytes.
pub const VIDEO_FIELD: &str = "video";
/// Multipart field carrying the frame rate as a decimal string.
pub const FPS_FIELD: &str = "fps";

/// Body of `GET /api/status`.
///
/// `pipeline_available` is kept as raw JSON because the backend only
/// promises something boolean-like.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub pipeline_available: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colmap_project_dir: Option<String>,
}

impl StatusResponse {
    pub fn is_pipeline_available(&self) -> bool {
        is_truthy(&self.pipeline_available)
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub data_dir: Option<String>,
    #[serde(default)]
    pub colmap_project_dir: Option<String>,
}

/// Error body returned with a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorDetail {
    /// Human readable text of `detail`, if it carries anything.
    ///
    /// Falsy values count as no detail. Strings are used as-is; other values
    /// (validation error lists) are rendered as compact JSON.
    pub fn message(&self) -> Option<String> {
        let detail = self.detail.as_ref().filter(|detail| is_truthy(detail))?;
        match detail {
            Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Loose truthiness: `null`, `false`, `0`, `NaN` and `""` are false,
/// everything else is true.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn status_flag_follows_loose_truthiness() {
        let parse = |body: Value| -> bool {
            serde_json::from_value::<StatusResponse>(body)
                .expect("status")
                .is_pipeline_available()
        };

        assert!(parse(json!({ "pipeline_available": true })));
        assert!(parse(json!({ "pipeline_available": 1 })));
        assert!(parse(json!({ "pipeline_available": "yes" })));
        assert!(!parse(json!({ "pipeline_available": false })));
        assert!(!parse(json!({ "pipeline_available": 0 })));
        assert!(!parse(json!({ "pipeline_available": "" })));
        assert!(!parse(json!({ "pipeline_available": null })));
        assert!(!parse(json!({})));
    }

    #[test]
    fn status_keeps_backend_directories() {
        let status: StatusResponse = serde_json::from_value(json!({
            "pipeline_available": true,
            "data_dir": "/data",
            "colmap_project_dir": "/app/colmap_project",
        }))
        .expect("status");
        assert_eq!(status.data_dir.as_deref(), Some("/data"));
        assert_eq!(
            status.colmap_project_dir.as_deref(),
            Some("/app/colmap_project")
        );
    }

    #[test]
    fn error_detail_prefers_string_detail() {
        let body: ErrorDetail =
            serde_json::from_value(json!({ "detail": "bad codec" })).expect("detail");
        assert_eq!(body.message().as_deref(), Some("bad codec"));
    }

    #[test]
    fn error_detail_without_detail_is_empty() {
        let body: ErrorDetail = serde_json::from_value(json!({ "error": "x" })).expect("detail");
        assert_eq!(body.message(), None);

        let body: ErrorDetail = serde_json::from_value(json!({ "detail": "" })).expect("detail");
        assert_eq!(body.message(), None);
    }

    #[test]
    fn falsy_detail_counts_as_missing() {
        for detail in [json!(0), json!(false), json!(null), json!("")] {
            let body: ErrorDetail =
                serde_json::from_value(json!({ "detail": detail.clone() })).expect("detail");
            assert_eq!(body.message(), None, "detail {detail}");
        }

        let body: ErrorDetail = serde_json::from_value(json!({ "detail": 42 })).expect("detail");
        assert_eq!(body.message().as_deref(), Some("42"));
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let body: ErrorDetail =
            serde_json::from_value(json!({ "detail": [{ "loc": ["body", "fps"] }] }))
                .expect("detail");
        assert_eq!(
            body.message().as_deref(),
            Some(r#"[{"loc":["body","fps"]}]"#)
        );
    }
}
