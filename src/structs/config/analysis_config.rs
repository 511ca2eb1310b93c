use crate::helpers::config_helper::ConfigHelper;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnalysisConfig {
    #[serde(default = "ConfigHelper::default_max_archive_bytes")]
    pub max_archive_bytes: u64,

    #[serde(default = "ConfigHelper::default_max_files")]
    pub max_files: usize,

    /// Upper bound on code units processed at once; sized for collaborator rate limits.
    #[serde(default = "ConfigHelper::default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_archive_bytes: ConfigHelper::default_max_archive_bytes(),
            max_files: ConfigHelper::default_max_files(),
            max_concurrency: ConfigHelper::default_max_concurrency(),
        }
    }
}
