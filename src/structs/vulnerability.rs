use serde::{Deserialize, Serialize};
use crate::enums::severity::Severity;
use crate::enums::vulnerability_kind::VulnerabilityKind;

/// A single detected issue. Immutable once emitted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vulnerability {
    #[serde(rename = "type")]
    pub kind: VulnerabilityKind,
    pub severity: Severity,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwe: Option<String>,
}

impl Vulnerability {
    pub fn new(kind: VulnerabilityKind, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            description: description.into(),
            location: None,
            cwe: Some(kind.default_cwe().to_string()),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_cwe(mut self, cwe: Option<&str>) -> Self {
        self.cwe = cwe.map(str::to_string);
        self
    }

    /// Key used to join suggestions back to findings.
    pub fn join_key(&self) -> (VulnerabilityKind, &str) {
        (self.kind, self.description.as_str())
    }
}
