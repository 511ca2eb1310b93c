use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;

use crate::config::constants::timeout_duration;
use crate::enums::ai_provider_error::AiProviderError;
use crate::services::rate_limiter::ApiRateLimiter;
use crate::structs::ai::openai::openai_message::OpenAIMessage;
use crate::structs::ai::openai::openai_request::{OpenAIRequest, OpenAIResponseFormat};
use crate::structs::ai::openai::openai_response::OpenAIResponse;
use crate::structs::config::ai_config::AiConfig;
use crate::traits::ai_provider::AiProvider;

#[derive(Clone)]
pub struct OpenAIProvider {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    max_tokens: u32,
    temperature: f32,
    timeout: Duration,
    rate_limiter: Arc<ApiRateLimiter>,
}

impl OpenAIProvider {
    pub fn new(api_key: String, config: &AiConfig, rate_limiter: Arc<ApiRateLimiter>) -> Result<Self, AiProviderError> {
        let timeout = timeout_duration(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiProviderError::NetworkError(e.to_string()))?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout,
            rate_limiter,
        })
    }

    /// Builds a provider from configuration, failing with `NotConfigured` when the key is absent.
    pub fn from_config(config: &AiConfig, rate_limiter: Arc<ApiRateLimiter>) -> Result<Self, AiProviderError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| AiProviderError::NotConfigured(format!("{} not configured", config.api_key_env)))?;
        Self::new(api_key, config, rate_limiter)
    }

    fn get_openai_messages(&self, system_prompt: String, user_prompts: Vec<String>) -> Vec<OpenAIMessage> {
        let mut messages = Vec::new();

        if !system_prompt.is_empty() {
            messages.push(OpenAIMessage::system(system_prompt));
        }

        messages.extend(user_prompts.into_iter().map(OpenAIMessage::user));
        messages
    }

    fn get_request(&self, system_prompt: String, user_prompts: Vec<String>) -> OpenAIRequest {
        OpenAIRequest {
            model: self.model.clone(),
            messages: self.get_openai_messages(system_prompt, user_prompts),
            max_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature),
            response_format: Some(OpenAIResponseFormat::json_object()),
        }
    }

    async fn make_request(&self, url: String, request_body: OpenAIRequest) -> Result<reqwest::Response, AiProviderError> {
        log::debug!("📦 Request model: {}", request_body.model);

        self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiProviderError::Timeout(self.timeout)
                } else {
                    AiProviderError::NetworkError(e.to_string())
                }
            })
    }
}

#[async_trait]
impl AiProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn chat(&self, system_prompt: String, user_prompts: Vec<String>) -> Result<String, AiProviderError> {
        self.rate_limiter.acquire().await;

        let url = format!("{}/chat/completions", self.base_url);
        let request_body = self.get_request(system_prompt, user_prompts);

        let response = self.make_request(url, request_body).await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            log::warn!("❌ OpenAI API error response ({}): {}", status, error_text);

            return Err(match status.as_u16() {
                401 => AiProviderError::AuthenticationError(error_text),
                429 => AiProviderError::QuotaExceeded(error_text),
                _ => AiProviderError::ApiError(format!("HTTP {}: {}", status, error_text)),
            });
        }

        let body: OpenAIResponse = response
            .json()
            .await
            .map_err(|e| AiProviderError::SerializationError(e.to_string()))?;

        body.first_content()
            .ok_or_else(|| AiProviderError::SerializationError("No response from OpenAI".to_string()))
    }
}
