use serde::{Deserialize, Serialize};
use crate::structs::aggregate_result::AggregateResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFilePenTestResponse {
    #[serde(flatten)]
    pub result: AggregateResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sandbox_id: Option<String>,
    pub timestamp: String,
}
