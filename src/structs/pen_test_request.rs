use serde::{Deserialize, Serialize};
use crate::enums::language::Language;
use crate::enums::test_type::TestType;

/// Single-snippet request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenTestRequest {
    pub code: String,
    pub language: Language,
    #[serde(default)]
    pub test_type: TestType,
    /// Name used for the snippet inside the sandbox and in logs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}
