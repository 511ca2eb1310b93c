use std::time::Duration;
use crate::enums::language::Language;

pub const CONFIG_DIR_NAME: &str = ".codeguard";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DAYTONA_API_KEY_ENV: &str = "DAYTONA_API_KEY";
pub const DAYTONA_API_URL_ENV: &str = "DAYTONA_API_URL";

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_DAYTONA_API_URL: &str = "https://app.daytona.io/api";
pub const DEFAULT_SANDBOX_WORKING_DIR: &str = "/home/daytona";

pub const MAX_ARCHIVE_BYTES: u64 = 250 * 1024 * 1024;
pub const MAX_FILES: usize = 50;
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

pub const SUPPORTED_FILE_EXTENSIONS: &[(&str, Language)] = &[
    ("py", Language::Python),
    ("js", Language::Javascript),
    ("jsx", Language::Javascript),
    ("ts", Language::Typescript),
    ("tsx", Language::Typescript),
    ("sh", Language::Bash),
    ("bash", Language::Bash),
    ("go", Language::Go),
    ("java", Language::Java),
];

pub const SKIPPED_BASENAMES: &[&str] = &[
    "package-lock.json",
    "package.json",
    "tsconfig.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    ".gitignore",
    ".env",
    "README.md",
    "LICENSE",
];

pub const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", "__pycache__", ".git", "dist", "build"];

pub const GENERIC_PREVENTION_TIPS: &[&str] = &[
    "Review the OWASP Top 10 security risks",
    "Implement input validation and sanitization",
    "Follow the principle of least privilege",
    "Keep dependencies up to date",
];

pub const PLACEHOLDER_EXPLANATION: &str =
    "The suggestion service did not return an explanation for this finding.";
pub const NO_FIX_AVAILABLE: &str = "No fix available";

pub fn timeout_duration(seconds: u64) -> Duration {
    Duration::from_secs(seconds)
}
