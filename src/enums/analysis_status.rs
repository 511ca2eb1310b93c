use serde::{Deserialize, Serialize};
use crate::structs::vulnerability_report::VulnerabilityReport;

/// User-visible outcome of a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    /// No findings and no execution error.
    Clean,
    Findings,
    /// At least one report carries an execution error; findings are still delivered.
    Degraded,
    Rejected,
}

impl AnalysisStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clean => "✅ CLEAN",
            Self::Findings => "🔒 FINDINGS",
            Self::Degraded => "⚠️ DEGRADED",
            Self::Rejected => "❌ REJECTED",
        }
    }

    /// Degraded wins over findings, findings over clean.
    pub fn of_reports<'a>(reports: impl IntoIterator<Item = &'a VulnerabilityReport>) -> Self {
        reports.into_iter().fold(Self::Clean, |status, report| {
            if status == Self::Degraded || report.is_degraded() {
                Self::Degraded
            } else if !report.vulnerabilities.is_empty() {
                Self::Findings
            } else {
                status
            }
        })
    }
}
