use serde::{Deserialize, Serialize};
use crate::structs::vulnerability::Vulnerability;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SecuritySuggestion {
    /// Verbatim copy of the finding this suggestion answers.
    pub vulnerability: Vulnerability,
    pub suggested_fix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_code: Option<String>,
    pub explanation: String,
    pub prevention_tips: Vec<String>,
}
