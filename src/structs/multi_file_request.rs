use serde::{Deserialize, Serialize};
use crate::enums::test_type::TestType;
use crate::structs::code_unit::CodeUnit;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiFilePenTestRequest {
    pub files: Vec<CodeUnit>,
    #[serde(default)]
    pub test_type: TestType,
}
