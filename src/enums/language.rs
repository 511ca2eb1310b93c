use std::fmt;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::config::constants::SUPPORTED_FILE_EXTENSIONS;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Typescript,
    Bash,
    Go,
    Java,
    Unknown,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Javascript => "javascript",
            Self::Typescript => "typescript",
            Self::Bash => "bash",
            Self::Go => "go",
            Self::Java => "java",
            Self::Unknown => "unknown",
        }
    }

    /// Resolves a language from a file name using the fixed extension table.
    pub fn from_filename(filename: &str) -> Self {
        let extension = Path::new(filename)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Self::from_extension(&extension)
    }

    pub fn from_extension(extension: &str) -> Self {
        SUPPORTED_FILE_EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, language)| *language)
            .unwrap_or(Language::Unknown)
    }

    /// Extension used when a snippet has no file name of its own.
    pub fn default_extension(&self) -> &'static str {
        match self {
            Self::Python => "py",
            Self::Javascript => "js",
            Self::Typescript => "ts",
            Self::Bash => "sh",
            Self::Go => "go",
            Self::Java => "java",
            Self::Unknown => "txt",
        }
    }

    /// Command prefix that runs a single source file inside the sandbox.
    pub fn run_command(&self) -> Option<&'static str> {
        match self {
            Self::Python => Some("python3"),
            Self::Javascript => Some("node"),
            Self::Typescript => Some("npx --yes tsx"),
            Self::Bash => Some("bash"),
            Self::Go => Some("go run"),
            Self::Java => Some("java"),
            Self::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        *self != Language::Unknown
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "javascript" | "js" => Ok(Self::Javascript),
            "typescript" | "ts" => Ok(Self::Typescript),
            "bash" | "sh" => Ok(Self::Bash),
            "go" | "golang" => Ok(Self::Go),
            "java" => Ok(Self::Java),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}
