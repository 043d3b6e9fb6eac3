use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::ArtifactRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// Quality scores computed by the analysis service for one mind-map upload.
///
/// The percentages are nominally within `0..=100`; they are kept wide here so
/// that a misbehaving service cannot make deserialization fail and callers can
/// clamp on display instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub completeness: i64,
    pub duplication: i64,
    pub coverage: i64,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadEnvelope {
    pub status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimized_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}

impl UploadEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == UploadStatus::Success
    }

    /// An empty `optimized_file` is treated the same as a missing one.
    pub fn artifact_ref(&self) -> Option<ArtifactRef> {
        self.optimized_file
            .as_deref()
            .and_then(|raw| ArtifactRef::new(raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_envelope() {
        let raw = r#"{
            "status": "success",
            "data": {"completeness": 80, "duplication": 20, "coverage": 65,
                     "suggestions": ["Add negative test cases"]},
            "optimized_file": "report_123.xlsx"
        }"#;
        let envelope: UploadEnvelope = serde_json::from_str(raw).expect("parse");
        assert!(envelope.is_success());
        let data = envelope.data.clone().expect("data");
        assert_eq!(data.duplication, 20);
        assert_eq!(data.suggestions, vec!["Add negative test cases".to_string()]);
        assert_eq!(
            envelope.artifact_ref().expect("artifact").as_str(),
            "report_123.xlsx"
        );
    }

    #[test]
    fn parses_error_envelope_with_null_data() {
        let raw = r#"{"status":"error","message":"Invalid file format","data":null}"#;
        let envelope: UploadEnvelope = serde_json::from_str(raw).expect("parse");
        assert!(!envelope.is_success());
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("Invalid file format"));
        assert!(envelope.artifact_ref().is_none());
    }

    #[test]
    fn unrecognized_status_is_not_success() {
        let envelope: UploadEnvelope =
            serde_json::from_str(r#"{"status":"pending"}"#).expect("parse");
        assert_eq!(envelope.status, UploadStatus::Unknown);
        assert!(!envelope.is_success());
    }

    #[test]
    fn accepts_naive_service_timestamp() {
        let raw = r#"{"status":"success","timestamp":"2024-05-01T10:15:30.123456"}"#;
        let envelope: UploadEnvelope = serde_json::from_str(raw).expect("parse");
        assert!(envelope.timestamp.is_some());
    }

    #[test]
    fn empty_optimized_file_is_not_an_artifact() {
        let envelope: UploadEnvelope =
            serde_json::from_str(r#"{"status":"success","optimized_file":""}"#).expect("parse");
        assert!(envelope.artifact_ref().is_none());
    }

    #[test]
    fn dot_segment_optimized_file_is_not_an_artifact() {
        for raw in [r#"".""#, r#""..""#] {
            let json = format!(r#"{{"status":"success","optimized_file":{raw}}}"#);
            let envelope: UploadEnvelope = serde_json::from_str(&json).expect("parse");
            assert!(envelope.artifact_ref().is_none(), "accepted {raw}");
        }
    }

    #[test]
    fn missing_suggestions_default_to_empty() {
        let data: AnalysisResult =
            serde_json::from_str(r#"{"completeness":1,"duplication":2,"coverage":3}"#)
                .expect("parse");
        assert!(data.suggestions.is_empty());
    }
}
