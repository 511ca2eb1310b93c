use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;
use crate::structs::file_analysis_result::FileAnalysisResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub files: Vec<FileAnalysisResult>,
    pub overall_risk_level: Severity,
    pub total_vulnerabilities: usize,
}
