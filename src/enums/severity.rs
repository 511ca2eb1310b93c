use std::fmt;
use serde::{Deserialize, Serialize};

/// Ordinal severity shared by findings and risk levels: `low < medium < high < critical`.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Severity {
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
    #[serde(rename = "critical")]
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Low => "💡",
            Self::Medium => "📋",
            Self::High => "⚠️",
            Self::Critical => "🚨",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Low
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
