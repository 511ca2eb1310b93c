use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AiProviderError {
    #[error("Suggestion API Error: {0}")]
    ApiError(String),
    #[error("Network Error: {0}")]
    NetworkError(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    #[error("Authentication Error: {0}")]
    AuthenticationError(String),
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Suggestion service not configured: {0}")]
    NotConfigured(String),
}
