use proptest::prelude::*;

use codeguard::enums::language::Language;
use codeguard::enums::severity::Severity;
use codeguard::enums::vulnerability_kind::VulnerabilityKind;
use codeguard::services::risk_aggregator::RiskAggregator;
use codeguard::structs::file_analysis_result::FileAnalysisResult;
use codeguard::structs::vulnerability::Vulnerability;
use codeguard::structs::vulnerability_report::VulnerabilityReport;

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Low),
        Just(Severity::Medium),
        Just(Severity::High),
        Just(Severity::Critical),
    ]
}

fn file(index: usize, severities: &[Severity]) -> FileAnalysisResult {
    let vulnerabilities: Vec<Vulnerability> = severities
        .iter()
        .map(|s| Vulnerability::new(VulnerabilityKind::Injection, *s, format!("finding in file {}", index)))
        .collect();

    FileAnalysisResult {
        filename: format!("file_{}.py", index),
        language: Language::Python,
        report: VulnerabilityReport {
            risk_level: RiskAggregator::risk_level(&vulnerabilities),
            vulnerabilities,
            ..Default::default()
        },
        suggestions: Vec::new(),
    }
}

#[test]
fn test_one_critical_file_and_one_clean_file() {
    let result = RiskAggregator::aggregate(vec![file(0, &[Severity::Critical]), file(1, &[])]);

    assert_eq!(result.overall_risk_level, Severity::Critical);
    assert_eq!(result.total_vulnerabilities, 1);
    assert_eq!(result.files[1].report.risk_level, Severity::Low);
}

proptest! {
    #[test]
    fn prop_risk_level_is_max_severity(severities in prop::collection::vec(severity_strategy(), 0..20)) {
        let findings: Vec<Vulnerability> = severities
            .iter()
            .map(|s| Vulnerability::new(VulnerabilityKind::WeakCryptography, *s, "x"))
            .collect();

        let expected = severities.iter().copied().max().unwrap_or(Severity::Low);
        prop_assert_eq!(RiskAggregator::risk_level(&findings), expected);
    }

    #[test]
    fn prop_aggregate_is_order_independent(
        files in prop::collection::vec(prop::collection::vec(severity_strategy(), 0..6), 0..8),
        rotation in 0usize..8,
    ) {
        let results: Vec<FileAnalysisResult> = files.iter().enumerate().map(|(i, s)| file(i, s)).collect();

        let mut reordered = results.clone();
        reordered.reverse();
        if !reordered.is_empty() {
            let by = rotation % reordered.len();
            reordered.rotate_left(by);
        }

        let forward = RiskAggregator::aggregate(results);
        let shuffled = RiskAggregator::aggregate(reordered);

        let expected_total: usize = files.iter().map(Vec::len).sum();
        let expected_level = files.iter().flatten().copied().max().unwrap_or(Severity::Low);

        prop_assert_eq!(forward.total_vulnerabilities, expected_total);
        prop_assert_eq!(forward.overall_risk_level, expected_level);
        prop_assert_eq!(shuffled.total_vulnerabilities, forward.total_vulnerabilities);
        prop_assert_eq!(shuffled.overall_risk_level, forward.overall_risk_level);
    }
}
