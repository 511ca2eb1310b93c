use std::sync::Arc;
use std::time::Duration;
use crate::enums::sandbox_error::{SandboxError, SandboxResult};
use crate::traits::sandbox_provider::{SandboxHandle, SandboxProvider};

/// Exclusive ownership of one provisioned sandbox.
///
/// `release` tears the sandbox down and consumes the lease. A lease dropped
/// without being released (early return, cancelled future, panic) schedules the
/// teardown on the current runtime instead, so every successful `create` is
/// paired with exactly one `delete`.
pub struct SandboxLease {
    provider: Arc<dyn SandboxProvider>,
    handle: SandboxHandle,
    teardown_timeout: Duration,
    released: bool,
}

impl SandboxLease {
    pub async fn acquire(
        provider: Arc<dyn SandboxProvider>,
        provision_timeout: Duration,
        teardown_timeout: Duration,
    ) -> SandboxResult<Self> {
        let handle = tokio::time::timeout(provision_timeout, provider.create())
            .await
            .map_err(|_| SandboxError::Timeout {
                operation: "create".to_string(),
                elapsed: provision_timeout,
            })??;

        log::debug!("📦 Sandbox {} provisioned via {}", handle.id, provider.name());

        Ok(Self {
            provider,
            handle,
            teardown_timeout,
            released: false,
        })
    }

    pub fn handle(&self) -> &SandboxHandle {
        &self.handle
    }

    pub fn id(&self) -> &str {
        &self.handle.id
    }

    pub fn provider(&self) -> &dyn SandboxProvider {
        self.provider.as_ref()
    }

    /// Deletes the sandbox. Failures are logged and swallowed.
    pub async fn release(mut self) {
        self.released = true;
        teardown(Arc::clone(&self.provider), self.handle.clone(), self.teardown_timeout).await;
    }
}

impl Drop for SandboxLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let provider = Arc::clone(&self.provider);
        let handle = self.handle.clone();
        let timeout = self.teardown_timeout;

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(teardown(provider, handle, timeout));
            }
            Err(_) => {
                log::warn!("⚠️ Sandbox {} dropped outside a runtime; it was not deleted", handle.id);
            }
        }
    }
}

async fn teardown(provider: Arc<dyn SandboxProvider>, handle: SandboxHandle, timeout: Duration) {
    match tokio::time::timeout(timeout, provider.delete(&handle)).await {
        Ok(Ok(())) => log::debug!("🧹 Sandbox {} deleted", handle.id),
        Ok(Err(e)) => log::warn!("⚠️ Sandbox teardown failed: {}", e),
        Err(_) => log::warn!("⚠️ Sandbox {} teardown timed out after {:?}", handle.id, timeout),
    }
}
