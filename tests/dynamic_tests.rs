use std::sync::Arc;
use std::time::Duration;

use codeguard::enums::language::Language;
use codeguard::services::dynamic_executor::DynamicExecutor;
use codeguard::services::sandbox::lease::SandboxLease;
use codeguard::structs::code_unit::CodeUnit;
use codeguard::structs::execution_output::ExecutionOutput;

use crate::common::{fast_sandbox_config, wait_for, CountingSandboxProvider, SandboxScript};

fn executor(sandbox: &Arc<CountingSandboxProvider>) -> DynamicExecutor {
    DynamicExecutor::new(sandbox.clone(), &fast_sandbox_config())
}

#[tokio::test]
async fn test_released_lease_deletes_once() {
    let sandbox = Arc::new(CountingSandboxProvider::new(SandboxScript::default()));

    let lease = SandboxLease::acquire(sandbox.clone(), Duration::from_secs(1), Duration::from_secs(1)).await.unwrap();
    assert_eq!(lease.id(), "sandbox-1");
    lease.release().await;

    assert_eq!(sandbox.creates(), 1);
    assert_eq!(sandbox.deletes(), 1);
}

#[tokio::test]
async fn test_dropped_lease_is_torn_down() {
    let sandbox = Arc::new(CountingSandboxProvider::new(SandboxScript::default()));

    {
        let _lease = SandboxLease::acquire(sandbox.clone(), Duration::from_secs(1), Duration::from_secs(1)).await.unwrap();
    }

    assert!(wait_for(|| sandbox.deletes() == 1).await);
    assert_eq!(sandbox.creates(), 1);
}

#[tokio::test]
async fn test_failed_create_never_deletes() {
    let sandbox = Arc::new(CountingSandboxProvider::new(SandboxScript {
        fail_create: true,
        ..SandboxScript::default()
    }));

    let result = SandboxLease::acquire(sandbox.clone(), Duration::from_secs(1), Duration::from_secs(1)).await;

    assert!(result.is_err());
    assert_eq!(sandbox.deletes(), 0);
}

#[tokio::test]
async fn test_exec_timeout_is_reported_and_sandbox_deleted() {
    let sandbox = Arc::new(CountingSandboxProvider::new(SandboxScript {
        exec_delay: Some(Duration::from_secs(3)),
        ..SandboxScript::default()
    }));
    let unit = CodeUnit::new("loop.py", "while True:\n    pass\n", Language::Python);

    let outcome = executor(&sandbox).execute(&unit).await;

    let error = outcome.execution_error.unwrap();
    assert!(error.contains("exec"));
    assert!(error.contains("timed out"));
    assert!(outcome.findings.is_empty());
    assert_eq!(outcome.sandbox_id.as_deref(), Some("sandbox-1"));
    assert_eq!(sandbox.deletes(), 1);
}

#[tokio::test]
async fn test_teardown_failure_is_not_surfaced() {
    let sandbox = Arc::new(CountingSandboxProvider::new(SandboxScript {
        fail_delete: true,
        output: ExecutionOutput {
            stdout: "hello\n".to_string(),
            ..ExecutionOutput::default()
        },
        ..SandboxScript::default()
    }));
    let unit = CodeUnit::new("hello.py", "print('hello')\n", Language::Python);

    let outcome = executor(&sandbox).execute(&unit).await;

    assert!(outcome.execution_error.is_none());
    assert_eq!(outcome.execution_output.as_deref(), Some("hello\n"));
    assert_eq!(sandbox.deletes(), 1);
}

#[tokio::test]
async fn test_unsupported_language_provisions_nothing() {
    let sandbox = Arc::new(CountingSandboxProvider::new(SandboxScript::default()));
    let unit = CodeUnit::new("notes.txt", "hello", Language::Unknown);

    let outcome = executor(&sandbox).execute(&unit).await;

    assert!(outcome.execution_error.unwrap().contains("No run command"));
    assert_eq!(sandbox.creates(), 0);
}

#[tokio::test]
async fn test_probe_runs_script_and_cleans_up() {
    let sandbox = Arc::new(CountingSandboxProvider::new(SandboxScript {
        output: ExecutionOutput {
            stdout: "Hello from the sandbox!\n".to_string(),
            ..ExecutionOutput::default()
        },
        ..SandboxScript::default()
    }));

    let output = executor(&sandbox).probe().await.unwrap();

    assert!(output.stdout.contains("Hello from the sandbox!"));
    assert_eq!(sandbox.commands.lock().unwrap().as_slice(), ["python3 codeguard_probe.py"]);
    assert_eq!(sandbox.deletes(), 1);
}
