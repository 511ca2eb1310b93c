use serde::Deserialize;
use crate::structs::execution_output::ExecutionOutput;

/// The toolbox API reports combined output in `result`; `stderr` is optional.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteResponse {
    #[serde(default)]
    pub exit_code: i32,
    #[serde(default, alias = "stdout")]
    pub result: String,
    #[serde(default)]
    pub stderr: String,
}

impl From<ExecuteResponse> for ExecutionOutput {
    fn from(response: ExecuteResponse) -> Self {
        ExecutionOutput {
            stdout: response.result,
            stderr: response.stderr,
            exit_code: response.exit_code,
        }
    }
}
