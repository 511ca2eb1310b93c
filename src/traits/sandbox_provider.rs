use async_trait::async_trait;
use crate::enums::sandbox_error::SandboxResult;
use crate::structs::execution_output::ExecutionOutput;

/// Opaque reference to one provisioned sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SandboxHandle {
    pub id: String,
}

/// Ephemeral sandbox collaborator: `create`, `upload_file`, `exec`, `delete`.
///
/// Callers should not drive these methods directly; `SandboxLease` pairs every
/// successful `create` with exactly one `delete`.
#[async_trait]
pub trait SandboxProvider: Send + Sync {

    fn name(&self) -> &'static str;

    async fn create(&self) -> SandboxResult<SandboxHandle>;

    async fn upload_file(&self, handle: &SandboxHandle, path: &str, bytes: Vec<u8>) -> SandboxResult<()>;

    async fn exec(&self, handle: &SandboxHandle, command: &str, working_dir: &str) -> SandboxResult<ExecutionOutput>;

    async fn delete(&self, handle: &SandboxHandle) -> SandboxResult<()>;
}
