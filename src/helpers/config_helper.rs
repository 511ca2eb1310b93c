use crate::config::constants::{
    DAYTONA_API_KEY_ENV, DEFAULT_DAYTONA_API_URL, DEFAULT_MAX_CONCURRENCY, DEFAULT_OPENAI_BASE_URL,
    DEFAULT_SANDBOX_WORKING_DIR, MAX_ARCHIVE_BYTES, MAX_FILES, OPENAI_API_KEY_ENV,
};

pub struct ConfigHelper;

impl ConfigHelper {
    pub fn default_provider() -> String {
        "openai".to_string()
    }

    pub fn default_model() -> String {
        "gpt-4o".to_string()
    }

    pub fn default_max_tokens() -> u32 {
        4096
    }

    pub fn default_temperature() -> f32 {
        0.3
    }

    pub fn default_ai_api_key_env() -> String {
        OPENAI_API_KEY_ENV.to_string()
    }

    pub fn default_ai_base_url() -> String {
        DEFAULT_OPENAI_BASE_URL.to_string()
    }

    pub fn default_ai_timeout_secs() -> u64 {
        60
    }

    pub fn default_requests_per_minute() -> u32 {
        50
    }

    pub fn default_burst_per_second() -> u32 {
        5
    }

    pub fn default_sandbox_api_url() -> String {
        DEFAULT_DAYTONA_API_URL.to_string()
    }

    pub fn default_sandbox_api_key_env() -> String {
        DAYTONA_API_KEY_ENV.to_string()
    }

    pub fn default_working_dir() -> String {
        DEFAULT_SANDBOX_WORKING_DIR.to_string()
    }

    pub fn default_provision_timeout_secs() -> u64 {
        60
    }

    pub fn default_exec_timeout_secs() -> u64 {
        30
    }

    pub fn default_teardown_timeout_secs() -> u64 {
        30
    }

    pub fn default_max_archive_bytes() -> u64 {
        MAX_ARCHIVE_BYTES
    }

    pub fn default_max_files() -> usize {
        MAX_FILES
    }

    pub fn default_max_concurrency() -> usize {
        DEFAULT_MAX_CONCURRENCY
    }

    /// Reads a credential from the environment. Empty values and template
    /// placeholders such as `your-api-key-here` count as missing.
    pub fn read_secret(env_var: &str) -> Option<String> {
        std::env::var(env_var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !Self::is_placeholder(value))
    }

    pub fn is_placeholder(value: &str) -> bool {
        value.is_empty() || value.starts_with("your-") || value.ends_with("-here")
    }

    /// First characters of a secret, for display.
    pub fn mask_secret(value: &str) -> String {
        let visible: String = value.chars().take(8).collect();
        format!("{}...", visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_rejected() {
        assert!(ConfigHelper::is_placeholder(""));
        assert!(ConfigHelper::is_placeholder("your-api-key"));
        assert!(ConfigHelper::is_placeholder("paste-key-here"));
        assert!(!ConfigHelper::is_placeholder("sk-live-123456"));
    }

    #[test]
    fn test_real_keys_mentioning_here_are_kept() {
        assert!(!ConfigHelper::is_placeholder("sk-proj-wherever42"));
        assert!(!ConfigHelper::is_placeholder("dtn_therefore_9f8e"));
        assert!(ConfigHelper::is_placeholder("your-openai-api-key-here"));
    }

    #[test]
    fn test_mask_secret_keeps_prefix() {
        assert_eq!(ConfigHelper::mask_secret("sk-abcdefghijkl"), "sk-abcde...");
        assert_eq!(ConfigHelper::mask_secret("abc"), "abc...");
    }
}
