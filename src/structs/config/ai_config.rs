use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AiConfig {
    #[serde(default = "ConfigHelper::default_provider")]
    pub provider: String,

    #[serde(default = "ConfigHelper::default_model")]
    pub model: String,

    #[serde(default = "ConfigHelper::default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "ConfigHelper::default_temperature")]
    pub temperature: f32,

    #[serde(default = "ConfigHelper::default_ai_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "ConfigHelper::default_ai_base_url")]
    pub base_url: String,

    #[serde(default = "ConfigHelper::default_ai_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "ConfigHelper::default_requests_per_minute")]
    pub requests_per_minute: u32,

    #[serde(default = "ConfigHelper::default_burst_per_second")]
    pub burst_per_second: u32,
}

impl AiConfig {
    /// Reads the API key from the configured environment variable, ignoring placeholder values.
    pub fn api_key(&self) -> Option<String> {
        ConfigHelper::read_secret(&self.api_key_env)
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ConfigHelper::default_provider(),
            model: ConfigHelper::default_model(),
            max_tokens: ConfigHelper::default_max_tokens(),
            temperature: ConfigHelper::default_temperature(),
            api_key_env: ConfigHelper::default_ai_api_key_env(),
            base_url: ConfigHelper::default_ai_base_url(),
            timeout_secs: ConfigHelper::default_ai_timeout_secs(),
            requests_per_minute: ConfigHelper::default_requests_per_minute(),
            burst_per_second: ConfigHelper::default_burst_per_second(),
        }
    }
}
