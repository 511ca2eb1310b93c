use serde::Serialize;
use crate::structs::ai::openai::openai_message::OpenAIMessage;

#[derive(Serialize, Debug, Clone)]
pub struct OpenAIResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl OpenAIResponseFormat {
    pub fn json_object() -> Self {
        Self { format_type: "json_object".to_string() }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct OpenAIRequest {
    pub model: String,
    pub messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<OpenAIResponseFormat>,
}
