use serde::{Deserialize, Serialize};
use crate::structs::security_suggestion::SecuritySuggestion;
use crate::structs::vulnerability_report::VulnerabilityReport;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenTestResponse {
    pub report: VulnerabilityReport,
    pub suggestions: Vec<SecuritySuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_id: Option<String>,
    pub timestamp: String,
}
