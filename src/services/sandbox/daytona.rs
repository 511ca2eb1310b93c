use std::time::Duration;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

use crate::config::constants::timeout_duration;
use crate::enums::sandbox_error::{SandboxError, SandboxResult};
use crate::structs::config::sandbox_config::SandboxConfig;
use crate::structs::execution_output::ExecutionOutput;
use crate::structs::sandbox::create_sandbox_response::CreateSandboxResponse;
use crate::structs::sandbox::execute_request::ExecuteRequest;
use crate::structs::sandbox::execute_response::ExecuteResponse;
use crate::traits::sandbox_provider::{SandboxHandle, SandboxProvider};

/// REST client for Daytona sandboxes.
#[derive(Clone)]
pub struct DaytonaSandboxProvider {
    client: Client,
    api_url: String,
    api_key: String,
    exec_timeout: Duration,
}

impl DaytonaSandboxProvider {
    pub fn new(api_key: String, api_url: &str, exec_timeout: Duration) -> SandboxResult<Self> {
        let client = Client::builder()
            .timeout(exec_timeout + Duration::from_secs(10))
            .build()
            .map_err(|e| SandboxError::CreationFailed(e.to_string()))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key,
            exec_timeout,
        })
    }

    pub fn from_config(config: &SandboxConfig) -> SandboxResult<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| SandboxError::NotConfigured(format!("{} not configured", config.api_key_env)))?;
        Self::new(api_key, &config.api_url, timeout_duration(config.exec_timeout_secs))
    }

    fn toolbox_url(&self, handle: &SandboxHandle, path: &str) -> String {
        format!("{}/toolbox/{}/toolbox/{}", self.api_url, handle.id, path)
    }

    /// Turns a non-2xx response into the error produced by `to_error`.
    async fn ensure_success(response: Response, to_error: impl FnOnce(String) -> SandboxError) -> SandboxResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
        Err(to_error(format!("HTTP {}: {}", status, body)))
    }
}

#[async_trait]
impl SandboxProvider for DaytonaSandboxProvider {
    fn name(&self) -> &'static str {
        "daytona"
    }

    async fn create(&self) -> SandboxResult<SandboxHandle> {
        let response = self
            .client
            .post(format!("{}/sandbox", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| SandboxError::CreationFailed(e.to_string()))?;

        let response = Self::ensure_success(response, SandboxError::CreationFailed).await?;
        let body: CreateSandboxResponse = response
            .json()
            .await
            .map_err(|e| SandboxError::CreationFailed(format!("invalid response: {}", e)))?;

        Ok(SandboxHandle { id: body.id })
    }

    async fn upload_file(&self, handle: &SandboxHandle, path: &str, bytes: Vec<u8>) -> SandboxResult<()> {
        let file_name = path.rsplit('/').next().unwrap_or(path).to_string();
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let upload_error = |reason: String| SandboxError::UploadFailed { path: path.to_string(), reason };

        let response = self
            .client
            .post(self.toolbox_url(handle, "files/upload"))
            .bearer_auth(&self.api_key)
            .query(&[("path", path)])
            .multipart(form)
            .send()
            .await
            .map_err(|e| upload_error(e.to_string()))?;

        Self::ensure_success(response, upload_error).await?;
        Ok(())
    }

    async fn exec(&self, handle: &SandboxHandle, command: &str, working_dir: &str) -> SandboxResult<ExecutionOutput> {
        let request = ExecuteRequest {
            command: command.to_string(),
            cwd: working_dir.to_string(),
            timeout: self.exec_timeout.as_secs(),
        };

        let response = self
            .client
            .post(self.toolbox_url(handle, "process/execute"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| SandboxError::ExecutionFailed(e.to_string()))?;

        let response = Self::ensure_success(response, SandboxError::ExecutionFailed).await?;
        let body: ExecuteResponse = response
            .json()
            .await
            .map_err(|e| SandboxError::ExecutionFailed(format!("invalid response: {}", e)))?;

        Ok(body.into())
    }

    async fn delete(&self, handle: &SandboxHandle) -> SandboxResult<()> {
        let teardown_error = |reason: String| SandboxError::TeardownFailed { id: handle.id.clone(), reason };

        let response = self
            .client
            .delete(format!("{}/sandbox/{}", self.api_url, handle.id))
            .bearer_auth(&self.api_key)
            .query(&[("force", "true")])
            .send()
            .await
            .map_err(|e| teardown_error(e.to_string()))?;

        Self::ensure_success(response, teardown_error).await?;
        Ok(())
    }
}
