use serde::{Deserialize, Serialize};

/// Structured remediation returned by the suggestion service. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AiFixResponse {
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub fixed_code: Option<String>,
    #[serde(default)]
    pub prevention_tips: Option<Vec<String>>,
}
