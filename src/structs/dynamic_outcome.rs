use crate::structs::vulnerability::Vulnerability;

/// What one sandboxed run contributes to a code unit's report.
#[derive(Debug, Clone, Default)]
pub struct DynamicOutcome {
    pub findings: Vec<Vulnerability>,
    pub execution_output: Option<String>,
    pub execution_error: Option<String>,
    pub sandbox_id: Option<String>,
}

impl DynamicOutcome {
    pub fn failed(reason: impl Into<String>, sandbox_id: Option<String>) -> Self {
        Self {
            execution_error: Some(reason.into()),
            sandbox_id,
            ..Default::default()
        }
    }
}
