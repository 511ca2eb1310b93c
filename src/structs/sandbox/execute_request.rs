use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct ExecuteRequest {
    pub command: String,
    pub cwd: String,
    /// Seconds the service lets the command run.
    pub timeout: u64,
}
