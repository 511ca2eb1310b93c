use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;
use crate::structs::vulnerability::Vulnerability;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityReport {
    pub vulnerabilities: Vec<Vulnerability>,
    pub risk_level: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_error: Option<String>,
}

impl VulnerabilityReport {
    pub fn is_degraded(&self) -> bool {
        self.execution_error.is_some()
    }
}
