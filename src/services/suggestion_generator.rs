use std::sync::Arc;
use std::time::Duration;
use futures::stream::{self, StreamExt};

use crate::config::constants::{timeout_duration, GENERIC_PREVENTION_TIPS, NO_FIX_AVAILABLE, PLACEHOLDER_EXPLANATION};
use crate::constants::prompts::SUGGESTION_SYSTEM_PROMPT;
use crate::enums::ai_provider_error::AiProviderError;
use crate::enums::language::Language;
use crate::helpers::prompt_generator::generate_suggestion_prompt;
use crate::helpers::response_parser::ResponseParser;
use crate::services::ai_providers::openai::OpenAIProvider;
use crate::services::rate_limiter::ApiRateLimiter;
use crate::structs::ai::ai_fix_response::AiFixResponse;
use crate::structs::config::config::Config;
use crate::structs::security_suggestion::SecuritySuggestion;
use crate::structs::vulnerability::Vulnerability;
use crate::traits::ai_provider::AiProvider;

/// Produces exactly one suggestion per finding, in finding order.
///
/// Each finding gets its own service call so a failure stays confined to that
/// item, which then receives the static fallback for its category.
pub struct SuggestionGenerator {
    provider: Result<Arc<dyn AiProvider>, AiProviderError>,
    timeout: Duration,
    concurrency: usize,
}

impl SuggestionGenerator {
    pub fn new(provider: Arc<dyn AiProvider>, timeout: Duration, concurrency: usize) -> Self {
        Self {
            provider: Ok(provider),
            timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// Generator whose every suggestion is a fallback carrying `reason`.
    pub fn unavailable(reason: AiProviderError) -> Self {
        Self {
            provider: Err(reason),
            timeout: Duration::ZERO,
            concurrency: 1,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let rate_limiter = Arc::new(ApiRateLimiter::from_config(&config.ai));

        match OpenAIProvider::from_config(&config.ai, rate_limiter) {
            Ok(provider) => Self::new(
                Arc::new(provider),
                timeout_duration(config.ai.timeout_secs),
                config.analysis.max_concurrency,
            ),
            Err(e) => {
                log::warn!("⚠️ Suggestion service unavailable, fallback suggestions will be used: {}", e);
                Self::unavailable(e)
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_ok()
    }

    pub async fn generate(&self, code: &str, language: Language, vulnerabilities: &[Vulnerability]) -> Vec<SecuritySuggestion> {
        stream::iter(vulnerabilities)
            .map(|vulnerability| self.suggest(code, language, vulnerability))
            .buffered(self.concurrency)
            .collect()
            .await
    }

    async fn suggest(&self, code: &str, language: Language, vulnerability: &Vulnerability) -> SecuritySuggestion {
        match self.request_fix(code, language, vulnerability).await {
            Ok(response) => Self::from_response(vulnerability, response),
            Err(e) => {
                log::warn!("⚠️ Suggestion failed for {}: {}", vulnerability.kind, e);
                Self::fallback(vulnerability, &e.to_string())
            }
        }
    }

    async fn request_fix(&self, code: &str, language: Language, vulnerability: &Vulnerability) -> Result<AiFixResponse, AiProviderError> {
        let provider = self.provider.as_ref().map_err(Clone::clone)?;
        let prompt = generate_suggestion_prompt(code, language, vulnerability);

        let reply = tokio::time::timeout(self.timeout, provider.chat(SUGGESTION_SYSTEM_PROMPT.to_string(), vec![prompt]))
            .await
            .map_err(|_| AiProviderError::Timeout(self.timeout))??;

        ResponseParser::parse_json(&reply)
    }

    fn from_response(vulnerability: &Vulnerability, response: AiFixResponse) -> SecuritySuggestion {
        let explanation = response.explanation.filter(|e| !e.trim().is_empty());

        SecuritySuggestion {
            vulnerability: vulnerability.clone(),
            suggested_fix: explanation.clone().unwrap_or_else(|| NO_FIX_AVAILABLE.to_string()),
            fixed_code: response.fixed_code,
            explanation: explanation.unwrap_or_else(|| PLACEHOLDER_EXPLANATION.to_string()),
            prevention_tips: response.prevention_tips.unwrap_or_default(),
        }
    }

    pub fn fallback(vulnerability: &Vulnerability, reason: &str) -> SecuritySuggestion {
        SecuritySuggestion {
            vulnerability: vulnerability.clone(),
            suggested_fix: vulnerability.kind.fallback_fix().to_string(),
            fixed_code: None,
            explanation: format!("Failed to generate AI suggestion: {}", reason),
            prevention_tips: GENERIC_PREVENTION_TIPS.iter().map(|tip| (*tip).to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::severity::Severity;
    use crate::enums::vulnerability_kind::VulnerabilityKind;

    fn finding() -> Vulnerability {
        Vulnerability::new(VulnerabilityKind::WeakCryptography, Severity::Medium, "md5 in use")
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let suggestion = SuggestionGenerator::from_response(&finding(), AiFixResponse::default());
        assert_eq!(suggestion.suggested_fix, NO_FIX_AVAILABLE);
        assert_eq!(suggestion.explanation, PLACEHOLDER_EXPLANATION);
        assert!(suggestion.prevention_tips.is_empty());
        assert!(suggestion.fixed_code.is_none());
    }

    #[test]
    fn test_explanation_doubles_as_suggested_fix() {
        let response = AiFixResponse {
            explanation: Some("Use SHA-256".to_string()),
            fixed_code: Some("hashlib.sha256(data)".to_string()),
            prevention_tips: Some(vec!["Avoid MD5".to_string()]),
        };
        let suggestion = SuggestionGenerator::from_response(&finding(), response);
        assert_eq!(suggestion.suggested_fix, "Use SHA-256");
        assert_eq!(suggestion.explanation, "Use SHA-256");
        assert_eq!(suggestion.prevention_tips, vec!["Avoid MD5".to_string()]);
    }

    #[test]
    fn test_fallback_is_never_empty() {
        for kind in VulnerabilityKind::ALL {
            let vulnerability = Vulnerability::new(kind, Severity::High, "x");
            let suggestion = SuggestionGenerator::fallback(&vulnerability, "timeout");
            assert_eq!(suggestion.vulnerability, vulnerability);
            assert_eq!(suggestion.suggested_fix, kind.fallback_fix());
            assert_eq!(suggestion.explanation, "Failed to generate AI suggestion: timeout");
            assert_eq!(suggestion.prevention_tips.len(), 4);
        }
    }

    #[tokio::test]
    async fn test_unavailable_generator_falls_back_for_every_item() {
        let generator = SuggestionGenerator::unavailable(AiProviderError::NotConfigured("OPENAI_API_KEY not configured".to_string()));
        assert!(!generator.is_available());
        let findings = vec![finding(), finding()];

        let suggestions = generator.generate("import hashlib", Language::Python, &findings).await;

        assert_eq!(suggestions.len(), 2);
        assert!(suggestions.iter().all(|s| s.explanation.contains("OPENAI_API_KEY not configured")));
    }
}
