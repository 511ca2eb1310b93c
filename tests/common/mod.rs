use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use codeguard::enums::ai_provider_error::AiProviderError;
use codeguard::enums::sandbox_error::{SandboxError, SandboxResult};
use codeguard::services::dynamic_executor::DynamicExecutor;
use codeguard::services::ingestion::Ingestor;
use codeguard::services::pen_test_orchestrator::PenTestOrchestrator;
use codeguard::services::suggestion_generator::SuggestionGenerator;
use codeguard::structs::config::analysis_config::AnalysisConfig;
use codeguard::structs::config::sandbox_config::SandboxConfig;
use codeguard::structs::execution_output::ExecutionOutput;
use codeguard::traits::ai_provider::AiProvider;
use codeguard::traits::sandbox_provider::{SandboxHandle, SandboxProvider};

/// Suggestion service double. Replies with a fix unless the prompt contains `fail_marker`.
pub struct ScriptedAiProvider {
    fail_marker: Option<String>,
    reply_delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedAiProvider {
    pub fn new() -> Self {
        Self { fail_marker: None, reply_delay: None, calls: AtomicUsize::new(0) }
    }

    pub fn failing_on(marker: &str) -> Self {
        Self { fail_marker: Some(marker.to_string()), ..Self::new() }
    }

    pub fn slow(delay: Duration) -> Self {
        Self { reply_delay: Some(delay), ..Self::new() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AiProvider for ScriptedAiProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn chat(&self, _system_prompt: String, user_prompts: Vec<String>) -> Result<String, AiProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.reply_delay {
            tokio::time::sleep(delay).await;
        }

        let prompt = user_prompts.join("\n");
        if let Some(marker) = &self.fail_marker {
            if prompt.contains(marker.as_str()) {
                return Err(AiProviderError::QuotaExceeded("scripted failure".to_string()));
            }
        }

        Ok(serde_json::json!({
            "explanation": "Scripted explanation",
            "fixedCode": "# fixed",
            "preventionTips": ["Validate input"]
        })
        .to_string())
    }
}

#[derive(Default, Clone)]
pub struct SandboxScript {
    pub fail_create: bool,
    pub fail_exec: bool,
    pub fail_delete: bool,
    pub exec_delay: Option<Duration>,
    pub output: ExecutionOutput,
}

/// Sandbox double that counts lifecycle calls.
pub struct CountingSandboxProvider {
    script: SandboxScript,
    pub creates: AtomicUsize,
    pub deletes: AtomicUsize,
    pub uploads: Mutex<Vec<String>>,
    pub commands: Mutex<Vec<String>>,
}

impl CountingSandboxProvider {
    pub fn new(script: SandboxScript) -> Self {
        Self {
            script,
            creates: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            uploads: Mutex::new(Vec::new()),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SandboxProvider for CountingSandboxProvider {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn create(&self) -> SandboxResult<SandboxHandle> {
        if self.script.fail_create {
            return Err(SandboxError::CreationFailed("no capacity".to_string()));
        }
        let n = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(SandboxHandle { id: format!("sandbox-{}", n) })
    }

    async fn upload_file(&self, _handle: &SandboxHandle, path: &str, _bytes: Vec<u8>) -> SandboxResult<()> {
        self.uploads.lock().unwrap().push(path.to_string());
        Ok(())
    }

    async fn exec(&self, _handle: &SandboxHandle, command: &str, _working_dir: &str) -> SandboxResult<ExecutionOutput> {
        self.commands.lock().unwrap().push(command.to_string());
        if let Some(delay) = self.script.exec_delay {
            tokio::time::sleep(delay).await;
        }
        if self.script.fail_exec {
            return Err(SandboxError::ExecutionFailed("process crashed".to_string()));
        }
        Ok(self.script.output.clone())
    }

    async fn delete(&self, handle: &SandboxHandle) -> SandboxResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.script.fail_delete {
            return Err(SandboxError::TeardownFailed { id: handle.id.clone(), reason: "gone".to_string() });
        }
        Ok(())
    }
}

pub fn fast_sandbox_config() -> SandboxConfig {
    SandboxConfig {
        provision_timeout_secs: 2,
        exec_timeout_secs: 1,
        teardown_timeout_secs: 2,
        ..SandboxConfig::default()
    }
}

pub fn orchestrator(ai: Arc<ScriptedAiProvider>, sandbox: Arc<CountingSandboxProvider>, max_concurrency: usize) -> PenTestOrchestrator {
    PenTestOrchestrator::new(
        Ingestor::new(&AnalysisConfig::default()),
        DynamicExecutor::new(sandbox, &fast_sandbox_config()),
        SuggestionGenerator::new(ai, Duration::from_secs(5), max_concurrency),
        max_concurrency,
    )
}

/// Builds a ZIP payload in memory. Names ending in `/` become directory entries.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }

    writer.finish().unwrap().into_inner()
}

pub async fn wait_for(condition: impl Fn() -> bool) -> bool {
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    condition()
}
