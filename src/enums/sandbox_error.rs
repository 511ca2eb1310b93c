use std::time::Duration;
use thiserror::Error;

pub type SandboxResult<T> = Result<T, SandboxError>;

/// Errors raised while talking to the ephemeral sandbox service.
#[derive(Debug, Clone, Error)]
pub enum SandboxError {
    #[error("Failed to create sandbox: {0}")]
    CreationFailed(String),

    #[error("Failed to upload {path}: {reason}")]
    UploadFailed { path: String, reason: String },

    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("Failed to delete sandbox {id}: {reason}")]
    TeardownFailed { id: String, reason: String },

    #[error("Sandbox {operation} timed out after {elapsed:?}")]
    Timeout { operation: String, elapsed: Duration },

    #[error("No run command for language '{0}'")]
    UnsupportedLanguage(String),

    #[error("Sandbox service not configured: {0}")]
    NotConfigured(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SandboxError::Timeout {
            operation: "exec".to_string(),
            elapsed: Duration::from_secs(30),
        };
        assert!(err.to_string().contains("exec"));
        assert!(err.to_string().contains("30"));

        let err = SandboxError::UploadFailed {
            path: "/home/daytona/main.py".to_string(),
            reason: "403".to_string(),
        };
        assert!(err.to_string().contains("main.py"));
    }
}
