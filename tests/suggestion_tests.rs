use std::sync::Arc;
use std::time::Duration;

use codeguard::config::constants::GENERIC_PREVENTION_TIPS;
use codeguard::enums::language::Language;
use codeguard::enums::severity::Severity;
use codeguard::enums::vulnerability_kind::VulnerabilityKind;
use codeguard::services::suggestion_generator::SuggestionGenerator;
use codeguard::structs::vulnerability::Vulnerability;

use crate::common::ScriptedAiProvider;

const CODE: &str = "import os, hashlib, pickle\nos.system(cmd)\nhashlib.md5(b'x')\npickle.loads(blob)\n";

fn three_findings() -> Vec<Vulnerability> {
    vec![
        Vulnerability::new(VulnerabilityKind::Injection, Severity::High, "os.system runs a shell").with_location("line 2"),
        Vulnerability::new(VulnerabilityKind::WeakCryptography, Severity::Medium, "md5 FAIL-ME").with_location("line 3"),
        Vulnerability::new(VulnerabilityKind::InsecureDeserialization, Severity::High, "pickle.loads").with_location("line 4"),
    ]
}

#[tokio::test]
async fn test_one_failure_among_three_uses_one_fallback() {
    let provider = Arc::new(ScriptedAiProvider::failing_on("FAIL-ME"));
    let generator = SuggestionGenerator::new(provider.clone(), Duration::from_secs(5), 3);
    let findings = three_findings();

    let suggestions = generator.generate(CODE, Language::Python, &findings).await;

    assert_eq!(suggestions.len(), 3);
    assert_eq!(provider.calls(), 3);

    let fallbacks: Vec<_> = suggestions
        .iter()
        .filter(|s| s.explanation.starts_with("Failed to generate AI suggestion"))
        .collect();
    assert_eq!(fallbacks.len(), 1);
    assert_eq!(fallbacks[0].vulnerability.kind, VulnerabilityKind::WeakCryptography);
    assert_eq!(fallbacks[0].suggested_fix, VulnerabilityKind::WeakCryptography.fallback_fix());
    assert_eq!(fallbacks[0].prevention_tips, GENERIC_PREVENTION_TIPS.to_vec());

    let fixed: Vec<_> = suggestions.iter().filter(|s| s.fixed_code.as_deref() == Some("# fixed")).collect();
    assert_eq!(fixed.len(), 2);
}

#[tokio::test]
async fn test_suggestions_keep_finding_order_and_content() {
    let provider = Arc::new(ScriptedAiProvider::new());
    let generator = SuggestionGenerator::new(provider, Duration::from_secs(5), 2);
    let findings = three_findings();

    let suggestions = generator.generate(CODE, Language::Python, &findings).await;

    for (suggestion, finding) in suggestions.iter().zip(&findings) {
        assert_eq!(&suggestion.vulnerability, finding);
        assert_eq!(suggestion.vulnerability.join_key(), finding.join_key());
    }
}

#[tokio::test]
async fn test_slow_service_times_out_into_fallback() {
    let provider = Arc::new(ScriptedAiProvider::slow(Duration::from_secs(5)));
    let generator = SuggestionGenerator::new(provider, Duration::from_millis(50), 3);
    let findings = three_findings();

    let suggestions = generator.generate(CODE, Language::Python, &findings).await;

    assert_eq!(suggestions.len(), 3);
    assert!(suggestions.iter().all(|s| s.explanation.contains("timed out")));
    assert!(suggestions.iter().all(|s| !s.prevention_tips.is_empty()));
}

#[tokio::test]
async fn test_no_findings_means_no_calls() {
    let provider = Arc::new(ScriptedAiProvider::new());
    let generator = SuggestionGenerator::new(provider.clone(), Duration::from_secs(5), 2);

    let suggestions = generator.generate(CODE, Language::Python, &[]).await;

    assert!(suggestions.is_empty());
    assert_eq!(provider.calls(), 0);
}
