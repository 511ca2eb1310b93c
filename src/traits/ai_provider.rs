use async_trait::async_trait;
use crate::enums::ai_provider_error::AiProviderError;

/// Generative-text collaborator used for remediation suggestions.
#[async_trait]
pub trait AiProvider: Send + Sync {

    fn name(&self) -> &'static str;

    /// Sends one system instruction plus user prompts and returns the raw reply text.
    async fn chat(&self, system_prompt: String, user_prompts: Vec<String>) -> Result<String, AiProviderError>;
}
