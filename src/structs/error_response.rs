use serde::{Deserialize, Serialize};
use crate::enums::analysis_status::AnalysisStatus;
use crate::errors::CodeguardError;

/// Structured error returned to the caller in place of a response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: AnalysisStatus,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Best-effort result computed before the failure, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partial: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn from_error(error: &CodeguardError) -> Self {
        let (error_message, details) = match error {
            CodeguardError::IngestionError { reason, .. } => ("Failed to process upload".to_string(), Some(reason.clone())),
            CodeguardError::ConfigurationError { message, .. } => (message.clone(), None),
            other => (other.user_message(), None),
        };

        Self {
            status: AnalysisStatus::Rejected,
            error: error_message,
            details,
            partial: None,
        }
    }

    pub fn with_partial<T: Serialize>(mut self, partial: &T) -> Self {
        self.partial = serde_json::to_value(partial).ok();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ingestion_rejection_keeps_reason_as_details() {
        let err = CodeguardError::ingestion_error("docs.zip", "No valid code files found in ZIP archive");
        let response = ErrorResponse::from_error(&err).with_partial(&serde_json::json!({ "unreadable": ["a.py"] }));

        assert_eq!(response.status, AnalysisStatus::Rejected);
        assert_eq!(response.error, "Failed to process upload");
        assert_eq!(response.details.as_deref(), Some("No valid code files found in ZIP archive"));
        assert_eq!(response.partial.unwrap()["unreadable"][0], "a.py");
    }
}
