use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct OpenAIResponse {
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
}

#[derive(Deserialize, Debug)]
pub struct OpenAIChoice {
    pub message: Option<OpenAIChoiceMessage>,
}

#[derive(Deserialize, Debug)]
pub struct OpenAIChoiceMessage {
    pub content: Option<String>,
}

impl OpenAIResponse {
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|content| !content.trim().is_empty())
    }
}
