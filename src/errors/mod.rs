use std::fmt;
use std::error::Error as StdError;
use serde::{Deserialize, Serialize};
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::sandbox_error::SandboxError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CodeguardError {
    // Ingestion errors (fatal for the request)
    IngestionError {
        source_name: String,
        reason: String,
    },

    // Configuration errors (fatal only for the feature that needs them)
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Collaborator errors (recovered per item)
    ExternalServiceError {
        service: String,
        operation: String,
        reason: String,
    },

    // File operation errors
    FileOperationError {
        file_path: String,
        operation: String,
        reason: String,
    },

    // Parser errors
    ParseError {
        content_type: String,
        line_number: Option<usize>,
        reason: String,
    },

    // Validation errors
    ValidationError {
        field: String,
        value: String,
        constraint: String,
        suggestion: Option<String>,
    },
}

impl CodeguardError {
    pub fn ingestion_error(source_name: &str, reason: &str) -> Self {
        Self::IngestionError {
            source_name: source_name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(|s| s.to_string()),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn service_error(service: &str, operation: &str, reason: &str) -> Self {
        Self::ExternalServiceError {
            service: service.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn file_error(file_path: &str, operation: &str, reason: &str) -> Self {
        Self::FileOperationError {
            file_path: file_path.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn validation_error(field: &str, value: &str, constraint: &str, suggestion: Option<&str>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    /// Whether the pipeline can keep going after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::ExternalServiceError { .. } => true,
            Self::ConfigurationError { .. } => true,
            Self::ValidationError { .. } => true,
            Self::IngestionError { .. } => false,
            Self::ConfigurationFileError { .. } => false,
            Self::FileOperationError { .. } => false,
            Self::ParseError { .. } => false,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::IngestionError { .. } => ErrorSeverity::High,
            Self::FileOperationError { .. } => ErrorSeverity::High,
            Self::ConfigurationFileError { .. } => ErrorSeverity::High,
            Self::ParseError { .. } => ErrorSeverity::Medium,
            Self::ExternalServiceError { .. } => ErrorSeverity::Medium,
            Self::ValidationError { .. } => ErrorSeverity::Low,
            Self::ConfigurationError { .. } => ErrorSeverity::Low,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::IngestionError { source_name, reason } => {
                format!("Could not ingest '{}': {}\n💡 Upload a ZIP archive containing .py, .js, .ts, .sh, .go or .java files", source_name, reason)
            }
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {}", message);
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {})", field));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
            Self::ConfigurationFileError { path, reason } => {
                format!("Configuration file error at '{}': {}\n💡 Check file permissions and syntax", path, reason)
            }
            Self::ExternalServiceError { service, operation, reason } => {
                format!("{} failed during {}: {}", service, operation, reason)
            }
            Self::FileOperationError { file_path, operation, reason } => {
                format!("File operation '{}' failed for '{}': {}\n💡 Check file permissions and path", operation, file_path, reason)
            }
            Self::ParseError { content_type, line_number, reason } => {
                let mut msg = format!("Parse error in {}: {}", content_type, reason);
                if let Some(line) = line_number {
                    msg.push_str(&format!(" (line {})", line));
                }
                msg
            }
            Self::ValidationError { field, value, constraint, suggestion } => {
                let mut msg = format!("Validation error for field '{}': value '{}' violates constraint '{}'", field, value, constraint);
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
                }
                msg
            }
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{:?}", self)
    }
}

impl fmt::Display for CodeguardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl StdError for CodeguardError {}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
            Self::Critical => "🔴",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Result type alias for codeguard operations
pub type CodeguardResult<T> = Result<T, CodeguardError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Handle error with appropriate logging and user feedback
    pub fn handle_error(error: &CodeguardError) {
        let severity = error.severity();

        log::error!("[{}] {}", severity.name(), error.technical_details());
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }
}

impl From<std::io::Error> for CodeguardError {
    fn from(error: std::io::Error) -> Self {
        CodeguardError::FileOperationError {
            file_path: String::new(),
            operation: "I/O operation".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for CodeguardError {
    fn from(error: serde_json::Error) -> Self {
        CodeguardError::ParseError {
            content_type: "JSON".to_string(),
            line_number: Some(error.line()),
            reason: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for CodeguardError {
    fn from(error: toml::de::Error) -> Self {
        CodeguardError::ParseError {
            content_type: "TOML".to_string(),
            line_number: None,
            reason: error.message().to_string(),
        }
    }
}

impl From<AiProviderError> for CodeguardError {
    fn from(error: AiProviderError) -> Self {
        match error {
            AiProviderError::NotConfigured(message) => {
                CodeguardError::config_error(&message, Some("ai.api_key_env"), Some("Export OPENAI_API_KEY or run 'codeguard init'"))
            }
            other => CodeguardError::service_error("Suggestion service", "generate suggestion", &other.to_string()),
        }
    }
}

impl From<SandboxError> for CodeguardError {
    fn from(error: SandboxError) -> Self {
        match error {
            SandboxError::NotConfigured(message) => {
                CodeguardError::config_error(&message, Some("sandbox.api_key_env"), Some("Export DAYTONA_API_KEY to enable dynamic analysis"))
            }
            other => CodeguardError::service_error("Sandbox service", "dynamic execution", &other.to_string()),
        }
    }
}
