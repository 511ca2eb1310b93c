use std::fs;
use std::path::{Path, PathBuf};
use crate::config::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DAYTONA_API_URL_ENV};
use crate::errors::{CodeguardError, CodeguardResult};
use crate::structs::config::config::Config;

pub struct ConfigManager;

impl ConfigManager {

    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .map(|d| d.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads `~/.codeguard/config.toml`, falling back to defaults when it is absent.
    pub fn load() -> CodeguardResult<Config> {
        let path = Self::config_path();
        let config = if path.exists() {
            log::info!("📋 Loading config from: {}", path.display());
            Self::load_from(&path)?
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Config::default()
        };

        Ok(Self::apply_env_overrides(config))
    }

    pub fn load_from(path: &Path) -> CodeguardResult<Config> {
        let content = fs::read_to_string(path).map_err(|e| CodeguardError::ConfigurationFileError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    fn apply_env_overrides(mut config: Config) -> Config {
        if let Ok(url) = std::env::var(DAYTONA_API_URL_ENV) {
            if !url.trim().is_empty() {
                config.sandbox.api_url = url;
            }
        }
        config
    }

    pub fn create_sample_config() -> CodeguardResult<PathBuf> {
        let sample_config = r#"# Codeguard configuration

# Suggestion service (OpenAI-compatible chat completions)
[ai]
provider = "openai"
model = "gpt-4o"
temperature = 0.3
max_tokens = 4096
api_key_env = "OPENAI_API_KEY"
base_url = "https://api.openai.com/v1"
timeout_secs = 60
requests_per_minute = 50
burst_per_second = 5

# Ephemeral sandbox service used by --mode dynamic / both
[sandbox]
api_url = "https://app.daytona.io/api"
api_key_env = "DAYTONA_API_KEY"
working_dir = "/home/daytona"
provision_timeout_secs = 60
exec_timeout_secs = 30
teardown_timeout_secs = 30

# Ingestion and scheduling
[analysis]
max_archive_bytes = 262144000  # 250 MiB
max_files = 50
max_concurrency = 4
"#;
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| CodeguardError::file_error(&dir.display().to_string(), "create directory", &e.to_string()))?;
        }
        fs::write(&path, sample_config).map_err(|e| CodeguardError::file_error(&path.display().to_string(), "write", &e.to_string()))?;
        log::info!("✅ Created sample config at: {}", path.display());
        Ok(path)
    }

    pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if config.analysis.max_files == 0 {
            errors.push("analysis.max_files must be at least 1".to_string());
        }
        if config.analysis.max_concurrency == 0 {
            errors.push("analysis.max_concurrency must be at least 1".to_string());
        }
        if config.analysis.max_archive_bytes == 0 {
            errors.push("analysis.max_archive_bytes must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&config.ai.temperature) {
            errors.push(format!("ai.temperature {} is outside 0.0..=2.0", config.ai.temperature));
        }
        if config.ai.timeout_secs == 0 || config.sandbox.exec_timeout_secs == 0 || config.sandbox.provision_timeout_secs == 0 {
            errors.push("timeouts must be greater than 0 seconds".to_string());
        }
        if !config.sandbox.api_url.starts_with("http") {
            errors.push(format!("sandbox.api_url '{}' is not an http(s) URL", config.sandbox.api_url));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

}
