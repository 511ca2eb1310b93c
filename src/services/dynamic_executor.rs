use std::sync::Arc;
use std::time::Duration;

use crate::config::constants::timeout_duration;
use crate::constants::execution_signatures::{ExecutionSignature, SignalPattern, EXECUTION_SIGNATURES};
use crate::enums::sandbox_error::{SandboxError, SandboxResult};
use crate::services::sandbox::daytona::DaytonaSandboxProvider;
use crate::services::sandbox::lease::SandboxLease;
use crate::structs::code_unit::CodeUnit;
use crate::structs::config::sandbox_config::SandboxConfig;
use crate::structs::dynamic_outcome::DynamicOutcome;
use crate::structs::execution_output::ExecutionOutput;
use crate::structs::vulnerability::Vulnerability;
use crate::traits::sandbox_provider::SandboxProvider;

const PROBE_FILE_NAME: &str = "codeguard_probe.py";
const PROBE_SCRIPT: &str = "print(\"Hello from the sandbox!\")\nfor i in range(5):\n    print(f\"Count: {i}\")\n";

/// Runs one code unit in its own ephemeral sandbox and classifies what it did.
pub struct DynamicExecutor {
    provider: Result<Arc<dyn SandboxProvider>, SandboxError>,
    working_dir: String,
    provision_timeout: Duration,
    exec_timeout: Duration,
    teardown_timeout: Duration,
}

impl DynamicExecutor {
    pub fn new(provider: Arc<dyn SandboxProvider>, config: &SandboxConfig) -> Self {
        Self::with_provider(Ok(provider), config)
    }

    pub fn from_config(config: &SandboxConfig) -> Self {
        let provider = DaytonaSandboxProvider::from_config(config).map(|p| Arc::new(p) as Arc<dyn SandboxProvider>);
        if let Err(e) = &provider {
            log::warn!("⚠️ Dynamic analysis unavailable: {}", e);
        }
        Self::with_provider(provider, config)
    }

    fn with_provider(provider: Result<Arc<dyn SandboxProvider>, SandboxError>, config: &SandboxConfig) -> Self {
        Self {
            provider,
            working_dir: config.working_dir.trim_end_matches('/').to_string(),
            provision_timeout: timeout_duration(config.provision_timeout_secs),
            exec_timeout: timeout_duration(config.exec_timeout_secs),
            teardown_timeout: timeout_duration(config.teardown_timeout_secs),
        }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_ok()
    }

    /// Never fails: every problem ends up in `execution_error`.
    pub async fn execute(&self, unit: &CodeUnit) -> DynamicOutcome {
        let provider = match &self.provider {
            Ok(provider) => Arc::clone(provider),
            Err(e) => return DynamicOutcome::failed(format!("Dynamic analysis unavailable: {}", e), None),
        };

        let run_command = match unit.language.run_command() {
            Some(command) => command,
            None => {
                return DynamicOutcome::failed(SandboxError::UnsupportedLanguage(unit.language.to_string()).to_string(), None)
            }
        };

        let lease = match SandboxLease::acquire(provider, self.provision_timeout, self.teardown_timeout).await {
            Ok(lease) => lease,
            Err(e) => {
                log::warn!("⚠️ Sandbox provisioning failed for {}: {}", unit.filename, e);
                return DynamicOutcome::failed(e.to_string(), None);
            }
        };

        let sandbox_id = lease.id().to_string();
        let file_name = unit.sandbox_file_name();
        let command = format!("{} {}", run_command, file_name);
        let result = self.run_in(&lease, &file_name, unit.content.as_bytes().to_vec(), &command).await;
        lease.release().await;

        match result {
            Ok(output) => {
                log::info!("✅ {} executed in sandbox {} (exit {})", unit.filename, sandbox_id, output.exit_code);
                Self::classify(&output, Some(sandbox_id))
            }
            Err(e) => {
                log::warn!("⚠️ Dynamic execution failed for {}: {}", unit.filename, e);
                DynamicOutcome::failed(e.to_string(), Some(sandbox_id))
            }
        }
    }

    /// Create, upload, exec and delete a tiny script to check the sandbox service end to end.
    pub async fn probe(&self) -> SandboxResult<ExecutionOutput> {
        let provider = self.provider.as_ref().map_err(Clone::clone)?;
        let lease = SandboxLease::acquire(Arc::clone(provider), self.provision_timeout, self.teardown_timeout).await?;
        let command = format!("python3 {}", PROBE_FILE_NAME);
        let result = self.run_in(&lease, PROBE_FILE_NAME, PROBE_SCRIPT.as_bytes().to_vec(), &command).await;
        lease.release().await;
        result
    }

    async fn run_in(&self, lease: &SandboxLease, file_name: &str, bytes: Vec<u8>, command: &str) -> SandboxResult<ExecutionOutput> {
        let path = format!("{}/{}", self.working_dir, file_name);

        tokio::time::timeout(self.exec_timeout, lease.provider().upload_file(lease.handle(), &path, bytes))
            .await
            .map_err(|_| SandboxError::Timeout { operation: "upload".to_string(), elapsed: self.exec_timeout })??;

        tokio::time::timeout(self.exec_timeout, lease.provider().exec(lease.handle(), command, &self.working_dir))
            .await
            .map_err(|_| SandboxError::Timeout { operation: "exec".to_string(), elapsed: self.exec_timeout })?
    }

    /// Maps captured output onto findings and diagnostics via the signature table.
    pub fn classify(output: &ExecutionOutput, sandbox_id: Option<String>) -> DynamicOutcome {
        let mut findings: Vec<Vulnerability> = Vec::new();
        let mut diagnostics: Vec<&'static str> = Vec::new();

        for signature in EXECUTION_SIGNATURES.iter().filter(|s| Self::matches(s, output)) {
            match signature.finding {
                Some((kind, severity)) => {
                    let vulnerability = Vulnerability::new(kind, severity, signature.description).with_location("runtime");
                    if !findings.iter().any(|f| f.join_key() == vulnerability.join_key()) {
                        findings.push(vulnerability);
                    }
                }
                None => {
                    if !diagnostics.contains(&signature.description) {
                        diagnostics.push(signature.description);
                    }
                }
            }
        }

        let mut transcript = output.transcript();
        let unexplained_exit = !output.succeeded() && findings.is_empty() && diagnostics.is_empty();
        if unexplained_exit || !diagnostics.is_empty() {
            if !transcript.is_empty() && !transcript.ends_with('\n') {
                transcript.push('\n');
            }
            transcript.push_str("[diagnostics]\n");
            for diagnostic in &diagnostics {
                transcript.push_str(&format!("- {}\n", diagnostic));
            }
            if unexplained_exit {
                transcript.push_str(&format!("- Process exited with code {}\n", output.exit_code));
            }
        }

        DynamicOutcome {
            findings,
            execution_output: Some(transcript),
            execution_error: None,
            sandbox_id,
        }
    }

    fn matches(signature: &ExecutionSignature, output: &ExecutionOutput) -> bool {
        match signature.pattern {
            SignalPattern::Output(needle) => output.stdout.contains(needle) || output.stderr.contains(needle),
            SignalPattern::ExitCode(code) => output.exit_code == code,
        }
    }
}
