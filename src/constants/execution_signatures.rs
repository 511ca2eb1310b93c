use crate::enums::severity::Severity;
use crate::enums::vulnerability_kind::VulnerabilityKind;
use crate::enums::vulnerability_kind::VulnerabilityKind::{Injection, PathTraversal, ResourceExhaustion, UnhandledRuntimeError};
use self::SignalPattern::{ExitCode, Output};

/// What a runtime signal is matched against.
#[derive(Debug, Clone, Copy)]
pub enum SignalPattern {
    /// Substring of stdout or stderr.
    Output(&'static str),
    ExitCode(i32),
}

/// Mapping from an observed runtime signal to a finding, or to a diagnostic
/// only when `finding` is `None`.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionSignature {
    pub pattern: SignalPattern,
    pub finding: Option<(VulnerabilityKind, Severity)>,
    pub description: &'static str,
}

const fn finding(pattern: SignalPattern, kind: VulnerabilityKind, description: &'static str) -> ExecutionSignature {
    escalated(pattern, kind, kind.default_severity(), description)
}

const fn escalated(pattern: SignalPattern, kind: VulnerabilityKind, severity: Severity, description: &'static str) -> ExecutionSignature {
    ExecutionSignature { pattern, finding: Some((kind, severity)), description }
}

const fn diagnostic(pattern: SignalPattern, description: &'static str) -> ExecutionSignature {
    ExecutionSignature { pattern, finding: None, description }
}

pub const EXECUTION_SIGNATURES: &[ExecutionSignature] = &[
    // Evidence that the program reached sensitive resources
    escalated(Output("root:x:0:0"), PathTraversal, Severity::Critical,
        "Program output contains /etc/passwd contents"),
    finding(Output("uid=0(root)"), Injection,
        "Program output shows a shell command ran as root"),

    // Crashes
    finding(Output("Traceback (most recent call last)"), UnhandledRuntimeError,
        "Unhandled Python exception during execution"),
    finding(Output("Uncaught"), UnhandledRuntimeError,
        "Uncaught JavaScript exception during execution"),
    finding(Output("panic:"), UnhandledRuntimeError,
        "Go program panicked during execution"),
    finding(Output("Exception in thread"), UnhandledRuntimeError,
        "Unhandled Java exception during execution"),
    finding(Output("RecursionError"), ResourceExhaustion,
        "Unbounded recursion exhausted the stack"),
    finding(Output("Maximum call stack size exceeded"), ResourceExhaustion,
        "Unbounded recursion exhausted the stack"),
    finding(Output("MemoryError"), ResourceExhaustion,
        "Program ran out of memory"),
    finding(Output("JavaScript heap out of memory"), ResourceExhaustion,
        "Program ran out of memory"),
    finding(ExitCode(137), ResourceExhaustion,
        "Process was killed (exit 137), likely by the memory limit"),
    escalated(ExitCode(139), UnhandledRuntimeError, Severity::High,
        "Process crashed with a segmentation fault (exit 139)"),

    // Environment problems: reported, never scored
    diagnostic(Output("ModuleNotFoundError"), "A Python dependency is missing in the sandbox"),
    diagnostic(Output("Cannot find module"), "A Node.js dependency is missing in the sandbox"),
    diagnostic(Output("command not found"), "The interpreter or a command is missing in the sandbox"),
    diagnostic(Output("SyntaxError"), "The program failed to parse"),
    diagnostic(Output("error: "), "The program failed to compile"),
];
