use crate::enums::severity::Severity;
use crate::structs::aggregate_result::AggregateResult;
use crate::structs::file_analysis_result::FileAnalysisResult;
use crate::structs::vulnerability::Vulnerability;

/// Max-reductions over the severity order. Both are order-independent.
pub struct RiskAggregator;

impl RiskAggregator {
    /// Highest severity present; `Low` for no findings.
    pub fn risk_level(vulnerabilities: &[Vulnerability]) -> Severity {
        vulnerabilities
            .iter()
            .map(|v| v.severity)
            .max()
            .unwrap_or_default()
    }

    pub fn overall_risk_level(files: &[FileAnalysisResult]) -> Severity {
        files
            .iter()
            .map(|f| f.report.risk_level)
            .max()
            .unwrap_or_default()
    }

    pub fn total_vulnerabilities(files: &[FileAnalysisResult]) -> usize {
        files.iter().map(|f| f.report.vulnerabilities.len()).sum()
    }

    pub fn aggregate(files: Vec<FileAnalysisResult>) -> AggregateResult {
        AggregateResult {
            overall_risk_level: Self::overall_risk_level(&files),
            total_vulnerabilities: Self::total_vulnerabilities(&files),
            files,
        }
    }
}
