use std::collections::HashMap;
use crate::constants::rule_catalog::{RuleDefinition, RULE_CATALOG};
use crate::enums::language::Language;
use crate::enums::vulnerability_kind::VulnerabilityKind;
use crate::structs::vulnerability::Vulnerability;

const SNIPPET_LIMIT: usize = 80;

/// Pattern-based static scanner over a single unit of source text.
///
/// Output is a pure function of `(content, language)`: findings are ordered by
/// the position of their first match, catalog order breaks ties, and at most
/// one finding survives per `(category, location)` pair. That finding keeps the
/// earliest position but carries the most severe match seen there.
pub struct RuleEngine;

struct Candidate<'a> {
    start: usize,
    rule_index: usize,
    rule: &'a RuleDefinition,
    matched: &'a str,
}

impl RuleEngine {
    pub fn scan(content: &str, language: Language) -> Vec<Vulnerability> {
        if !language.is_known() || content.trim().is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate<'_>> = RULE_CATALOG
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.applies_to(language))
            .flat_map(|(rule_index, rule)| {
                rule.matcher
                    .spans(content)
                    .into_iter()
                    .map(move |(start, end)| Candidate {
                        start,
                        rule_index,
                        rule,
                        matched: &content[start..end],
                    })
            })
            .collect();

        candidates.sort_by_key(|c| (c.start, c.rule_index));

        let line_starts = Self::line_starts(content);
        let mut seen: HashMap<(VulnerabilityKind, Option<String>), usize> = HashMap::new();
        let mut findings: Vec<Vulnerability> = Vec::new();

        for candidate in candidates {
            let location = candidate
                .rule
                .locate
                .then(|| format!("line {}", Self::line_of(&line_starts, candidate.start)));

            log::debug!("🔎 Rule {} matched at offset {}", candidate.rule.id, candidate.start);

            let key = (candidate.rule.kind, location.clone());
            match seen.get(&key) {
                Some(&index) => {
                    if candidate.rule.severity > findings[index].severity {
                        let stronger = Self::to_vulnerability(candidate.rule, candidate.matched, location);
                        let kept = &mut findings[index];
                        kept.severity = stronger.severity;
                        kept.description = stronger.description;
                        kept.cwe = stronger.cwe;
                    }
                }
                None => {
                    seen.insert(key, findings.len());
                    findings.push(Self::to_vulnerability(candidate.rule, candidate.matched, location));
                }
            }
        }

        findings
    }

    fn to_vulnerability(rule: &RuleDefinition, matched: &str, location: Option<String>) -> Vulnerability {
        let description = rule.description.replace("{match}", &Self::snippet(matched));
        let cwe = rule.cwe.unwrap_or_else(|| rule.kind.default_cwe());

        let vulnerability = Vulnerability::new(rule.kind, rule.severity, description).with_cwe(Some(cwe));
        match location {
            Some(location) => vulnerability.with_location(location),
            None => vulnerability,
        }
    }

    fn snippet(matched: &str) -> String {
        let first_line = matched.lines().next().unwrap_or_default().trim();
        if first_line.chars().count() > SNIPPET_LIMIT {
            let truncated: String = first_line.chars().take(SNIPPET_LIMIT).collect();
            format!("{}...", truncated)
        } else {
            first_line.to_string()
        }
    }

    fn line_starts(content: &str) -> Vec<usize> {
        std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect()
    }

    /// 1-based line containing `offset`.
    fn line_of(line_starts: &[usize], offset: usize) -> usize {
        line_starts.partition_point(|&start| start <= offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::severity::Severity;

    #[test]
    fn test_interpolated_os_system_is_critical_injection() {
        let findings = RuleEngine::scan("import os\nx = input()\nos.system(f\"echo {x}\")\n", Language::Python);

        let injection: Vec<_> = findings.iter().filter(|v| v.kind == VulnerabilityKind::Injection).collect();
        assert_eq!(injection.len(), 1);
        assert_eq!(injection[0].severity, Severity::Critical);
        assert_eq!(injection[0].location.as_deref(), Some("line 3"));
        assert_eq!(injection[0].cwe.as_deref(), Some("CWE-78"));
    }

    #[test]
    fn test_benign_code_has_no_findings() {
        assert!(RuleEngine::scan("def add(a, b):\n    return a + b\n", Language::Python).is_empty());
        assert!(RuleEngine::scan("const add = (a, b) => a + b;\n", Language::Javascript).is_empty());
    }

    #[test]
    fn test_findings_ordered_by_position() {
        let code = "const t = `${Math.random()}`;\nel.innerHTML = t;\n";
        let findings = RuleEngine::scan(code, Language::Javascript);
        let kinds: Vec<_> = findings.iter().map(|v| v.kind).collect();
        assert_eq!(kinds, vec![VulnerabilityKind::InsecureRandomness, VulnerabilityKind::CrossSiteScripting]);
    }

    #[test]
    fn test_same_category_same_line_collapses() {
        let code = "session_token = str(random.random()) + str(random.randint(1, 9))\n";
        let findings = RuleEngine::scan(code, Language::Python);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Medium);
    }

    #[test]
    fn test_collapsed_finding_keeps_highest_severity() {
        let code = "eval(expr); cursor.execute(f\"SELECT * FROM t WHERE id = {uid}\")\n";
        let findings = RuleEngine::scan(code, Language::Python);

        let injection: Vec<_> = findings.iter().filter(|v| v.kind == VulnerabilityKind::Injection).collect();
        assert_eq!(injection.len(), 1);
        assert_eq!(injection[0].severity, Severity::Critical);
        assert_eq!(injection[0].location.as_deref(), Some("line 1"));
        assert!(!injection[0].description.contains("eval"));
    }

    #[test]
    fn test_weaker_later_match_does_not_downgrade() {
        let code = "import os\nos.system(f\"rm {path}\"); eval(cmd)\n";
        let findings = RuleEngine::scan(code, Language::Python);

        let injection: Vec<_> = findings.iter().filter(|v| v.kind == VulnerabilityKind::Injection).collect();
        assert_eq!(injection.len(), 1);
        assert_eq!(injection[0].severity, Severity::Critical);
    }

    #[test]
    fn test_language_scoping() {
        let code = "os.system(cmd)\n";
        assert_eq!(RuleEngine::scan(code, Language::Python).len(), 1);
        assert!(RuleEngine::scan(code, Language::Go).is_empty());
        assert!(RuleEngine::scan(code, Language::Unknown).is_empty());
    }

    #[test]
    fn test_line_of() {
        let starts = RuleEngine::line_starts("a\nb\nc");
        assert_eq!(RuleEngine::line_of(&starts, 0), 1);
        assert_eq!(RuleEngine::line_of(&starts, 2), 2);
        assert_eq!(RuleEngine::line_of(&starts, 4), 3);
    }
}
