use serde::{Deserialize, Serialize};
use crate::enums::language::Language;

/// One source file plus its detected language; the atomic unit of analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeUnit {
    pub filename: String,
    pub content: String,
    pub language: Language,
}

impl CodeUnit {
    pub fn new(filename: impl Into<String>, content: impl Into<String>, language: Language) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            language,
        }
    }

    /// Basename used when the unit is written into a sandbox. Falls back to
    /// `main.<ext>` when the name has no safe characters left.
    pub fn sandbox_file_name(&self) -> String {
        let basename = self.filename.rsplit('/').next().unwrap_or_default();
        let sanitized: String = basename
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            .collect();

        if sanitized.trim_matches('.').is_empty() {
            format!("main.{}", self.language.default_extension())
        } else {
            sanitized
        }
    }
}
