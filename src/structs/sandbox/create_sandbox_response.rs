use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct CreateSandboxResponse {
    pub id: String,
}
