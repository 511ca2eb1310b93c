use serde::{Deserialize, Serialize};
use crate::helpers::config_helper::ConfigHelper;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SandboxConfig {
    #[serde(default = "ConfigHelper::default_sandbox_api_url")]
    pub api_url: String,

    #[serde(default = "ConfigHelper::default_sandbox_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "ConfigHelper::default_working_dir")]
    pub working_dir: String,

    #[serde(default = "ConfigHelper::default_provision_timeout_secs")]
    pub provision_timeout_secs: u64,

    #[serde(default = "ConfigHelper::default_exec_timeout_secs")]
    pub exec_timeout_secs: u64,

    #[serde(default = "ConfigHelper::default_teardown_timeout_secs")]
    pub teardown_timeout_secs: u64,
}

impl SandboxConfig {
    pub fn api_key(&self) -> Option<String> {
        ConfigHelper::read_secret(&self.api_key_env)
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            api_url: ConfigHelper::default_sandbox_api_url(),
            api_key_env: ConfigHelper::default_sandbox_api_key_env(),
            working_dir: ConfigHelper::default_working_dir(),
            provision_timeout_secs: ConfigHelper::default_provision_timeout_secs(),
            exec_timeout_secs: ConfigHelper::default_exec_timeout_secs(),
            teardown_timeout_secs: ConfigHelper::default_teardown_timeout_secs(),
        }
    }
}
