use serde::{Deserialize, Serialize};

/// Raw result of running a command in a sandbox.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOutput {
    #[serde(default)]
    pub stdout: String,
    #[serde(default)]
    pub stderr: String,
    #[serde(default)]
    pub exit_code: i32,
}

impl ExecutionOutput {
    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }

    /// Verbatim transcript kept on the report.
    pub fn transcript(&self) -> String {
        let mut transcript = self.stdout.clone();
        if !self.stderr.trim().is_empty() {
            if !transcript.is_empty() && !transcript.ends_with('\n') {
                transcript.push('\n');
            }
            transcript.push_str("[stderr]\n");
            transcript.push_str(&self.stderr);
        }
        transcript
    }
}
