use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use serde::Serialize;

use crate::config::config_manager::ConfigManager;
use crate::config::constants::{DAYTONA_API_KEY_ENV, OPENAI_API_KEY_ENV};
use crate::enums::commands::Commands;
use crate::enums::language::Language;
use crate::enums::test_type::TestType;
use crate::errors::{CodeguardError, CodeguardResult};
use crate::helpers::config_helper::ConfigHelper;
use crate::logger::report_logger::ReportLogger;
use crate::services::dynamic_executor::DynamicExecutor;
use crate::services::ingestion::Ingestor;
use crate::services::pen_test_orchestrator::PenTestOrchestrator;
use crate::services::suggestion_generator::SuggestionGenerator;
use crate::structs::code_unit::CodeUnit;
use crate::structs::config::config::Config;
use crate::structs::error_response::ErrorResponse;
use crate::structs::multi_file_request::MultiFilePenTestRequest;
use crate::structs::pen_test_request::PenTestRequest;

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self {
            start_time: None,
        }
    }

    pub async fn run_command(&mut self, command: Commands) -> CodeguardResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Validate { probe_sandbox } => self.validate_command(probe_sandbox).await,
            Commands::Scan { file, language, mode, output } => self.scan_command(&file, language, mode, output.as_deref()).await,
            Commands::Files { files, mode, output } => self.files_command(&files, mode, output.as_deref()).await,
            Commands::Archive { archive, mode, output } => self.archive_command(&archive, mode, output.as_deref()).await,
        };

        if let Some(start) = self.start_time {
            let duration = start.elapsed();
            log::info!("⏱️  Command completed in {:.2}s", duration.as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> CodeguardResult<()> {
        log::info!("🚀 Initializing codeguard configuration...");

        match ConfigManager::create_sample_config() {
            Ok(_) => {
                log::info!("✅ Configuration file created successfully!");
                log::info!("🔑 Export {} and {} to enable suggestions and dynamic analysis.", OPENAI_API_KEY_ENV, DAYTONA_API_KEY_ENV);
                log::info!("🔧 Run 'codeguard validate' to check your configuration.");
                Ok(())
            }
            Err(e) => {
                log::error!("❌ Failed to create configuration: {}", e);
                Err(e)
            }
        }
    }

    async fn validate_command(&self, probe_sandbox: bool) -> CodeguardResult<()> {
        log::info!("🔍 Validating codeguard configuration...");

        let config = Self::load_config()?;
        log::info!("✅ Configuration is valid");

        let suggestions = SuggestionGenerator::from_config(&config);
        match config.ai.api_key().filter(|_| suggestions.is_available()) {
            Some(key) => log::info!("✅ Suggestion service: {} ({})", config.ai.model, ConfigHelper::mask_secret(&key)),
            None => log::warn!("⚠️ Suggestion service: {} not configured, fallback suggestions will be used", config.ai.api_key_env),
        }

        let executor = DynamicExecutor::from_config(&config.sandbox);
        match config.sandbox.api_key().filter(|_| executor.is_available()) {
            Some(key) => log::info!("✅ Sandbox service: {} ({})", config.sandbox.api_url, ConfigHelper::mask_secret(&key)),
            None => log::warn!("⚠️ Sandbox service: {} not configured, dynamic analysis unavailable", config.sandbox.api_key_env),
        }

        if probe_sandbox {
            log::info!("🧪 Probing sandbox service (create → upload → exec → delete)...");
            let output = executor.probe().await.map_err(|e| {
                log::error!("❌ Sandbox probe failed: {}", e);
                CodeguardError::from(e)
            })?;
            log::info!("✅ Sandbox probe passed (exit {})", output.exit_code);
            log::debug!("Probe output:\n{}", output.transcript());
        }

        Ok(())
    }

    async fn scan_command(&self, file: &Path, language: Option<Language>, mode: TestType, output: Option<&Path>) -> CodeguardResult<()> {
        let config = Self::load_config()?;
        let code = Self::read_source(file)?;
        let filename = Self::display_name(file);
        let language = language.unwrap_or_else(|| Language::from_filename(&filename));
        if !language.is_known() {
            let error = CodeguardError::validation_error(
                "language",
                &filename,
                "extension must be one of .py .js .jsx .ts .tsx .sh .bash .go .java",
                Some("Pass --language explicitly"),
            );
            return Self::reject(error, output);
        }

        let request = PenTestRequest {
            code,
            language,
            test_type: mode,
            filename: Some(filename),
        };

        let orchestrator = PenTestOrchestrator::from_config(&config);
        match orchestrator.analyze_snippet(&request).await {
            Ok(response) => {
                ReportLogger::print_single_report(&response);
                Self::write_json(&response, output)
            }
            Err(e) => Self::reject(e, output),
        }
    }

    async fn files_command(&self, files: &[PathBuf], mode: TestType, output: Option<&Path>) -> CodeguardResult<()> {
        let config = Self::load_config()?;

        let mut units = Vec::new();
        let mut unreadable = Vec::new();
        for path in files {
            match Self::read_source(path) {
                Ok(content) => {
                    let filename = path.display().to_string();
                    let language = Language::from_filename(&filename);
                    units.push(CodeUnit::new(filename, content, language));
                }
                Err(e) => {
                    log::warn!("⚠️ Skipping {}: {}", path.display(), e);
                    unreadable.push(path.display().to_string());
                }
            }
        }

        let request = MultiFilePenTestRequest { files: units, test_type: mode };
        let orchestrator = PenTestOrchestrator::from_config(&config);
        match orchestrator.analyze_files(request).await {
            Ok(response) => {
                ReportLogger::print_multi_report(&response);
                Self::write_json(&response, output)
            }
            Err(e) if unreadable.is_empty() => Self::reject(e, output),
            Err(e) => {
                let response = ErrorResponse::from_error(&e).with_partial(&serde_json::json!({ "unreadable": unreadable }));
                ReportLogger::print_error(&response);
                Self::write_json(&response, output)?;
                Err(e)
            }
        }
    }

    async fn archive_command(&self, archive: &Path, mode: TestType, output: Option<&Path>) -> CodeguardResult<()> {
        let config = Self::load_config()?;
        let source_name = Self::display_name(archive);

        let payload = match Self::read_archive(archive, &source_name, &Ingestor::new(&config.analysis)) {
            Ok(payload) => payload,
            Err(e @ CodeguardError::IngestionError { .. }) => return Self::reject(e, output),
            Err(e) => return Err(e),
        };

        log::info!("📦 Processing archive {} ({} bytes)", source_name, payload.len());

        let orchestrator = PenTestOrchestrator::from_config(&config);
        match orchestrator.analyze_archive(&source_name, &payload, mode).await {
            Ok(response) => {
                ReportLogger::print_multi_report(&response);
                Self::write_json(&response, output)
            }
            Err(e) => Self::reject(e, output),
        }
    }

    fn load_config() -> CodeguardResult<Config> {
        let config = ConfigManager::load().map_err(|e| {
            log::error!("❌ Failed to load configuration: {}", e);
            log::error!("💡 Run 'codeguard init' to create a configuration file.");
            e
        })?;

        ConfigManager::validate_config(&config).map_err(|errors| {
            for error in &errors {
                log::error!("   - {}", error);
            }
            CodeguardError::config_error(&errors.join("; "), None, Some("Fix the values in ~/.codeguard/config.toml"))
        })?;

        Ok(config)
    }

    /// Size is checked from metadata so oversized archives are never buffered.
    fn read_archive(archive: &Path, source_name: &str, ingestor: &Ingestor) -> CodeguardResult<Vec<u8>> {
        let size = fs::metadata(archive)
            .map_err(|e| CodeguardError::file_error(&archive.display().to_string(), "stat", &e.to_string()))?
            .len();
        ingestor.check_size(source_name, size)?;

        fs::read(archive).map_err(|e| CodeguardError::file_error(&archive.display().to_string(), "read", &e.to_string()))
    }

    fn read_source(path: &Path) -> CodeguardResult<String> {
        fs::read_to_string(path).map_err(|e| CodeguardError::file_error(&path.display().to_string(), "read", &e.to_string()))
    }

    fn display_name(path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Prints the structured error, then hands the error back so the process exits non-zero.
    fn reject(error: CodeguardError, output: Option<&Path>) -> CodeguardResult<()> {
        let response = ErrorResponse::from_error(&error);
        ReportLogger::print_error(&response);
        Self::write_json(&response, output)?;
        Err(error)
    }

    fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> CodeguardResult<()> {
        let json = serde_json::to_string_pretty(value)?;

        match output {
            Some(path) => {
                fs::write(path, json)
                    .map_err(|e| CodeguardError::file_error(&path.display().to_string(), "write", &e.to_string()))?;
                log::info!("💾 Saved results to {}", path.display());
            }
            None => println!("{}", json),
        }

        Ok(())
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::structs::config::analysis_config::AnalysisConfig;

    fn ingestor(max_archive_bytes: u64) -> Ingestor {
        Ingestor::new(&AnalysisConfig {
            max_archive_bytes,
            ..AnalysisConfig::default()
        })
    }

    #[test]
    fn test_oversized_archive_rejected_from_metadata() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 128]).unwrap();

        let err = CommandRunner::read_archive(file.path(), "big.zip", &ingestor(64)).unwrap_err();

        assert!(matches!(err, CodeguardError::IngestionError { .. }));
        assert!(err.to_string().contains("big.zip"));
    }

    #[test]
    fn test_archive_within_limit_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"PK\x05\x06").unwrap();

        let payload = CommandRunner::read_archive(file.path(), "small.zip", &ingestor(64)).unwrap();

        assert_eq!(payload, b"PK\x05\x06".to_vec());
    }

    #[test]
    fn test_missing_archive_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CommandRunner::read_archive(&dir.path().join("absent.zip"), "absent.zip", &ingestor(64)).unwrap_err();

        assert!(matches!(err, CodeguardError::FileOperationError { .. }));
    }
}
