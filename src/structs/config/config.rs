use serde::{Deserialize, Serialize};
use crate::structs::config::ai_config::AiConfig;
use crate::structs::config::analysis_config::AnalysisConfig;
use crate::structs::config::sandbox_config::SandboxConfig;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub sandbox: SandboxConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}
