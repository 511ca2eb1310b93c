use serde::{Deserialize, Serialize};
use crate::enums::language::Language;
use crate::structs::security_suggestion::SecuritySuggestion;
use crate::structs::vulnerability_report::VulnerabilityReport;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileAnalysisResult {
    pub filename: String,
    pub language: Language,
    pub report: VulnerabilityReport,
    pub suggestions: Vec<SecuritySuggestion>,
}
