use serde::de::DeserializeOwned;
use crate::enums::ai_provider_error::AiProviderError;

/// Pulls a JSON payload out of a model reply that may be wrapped in markdown
/// fences or surrounded by prose.
pub struct ResponseParser;

impl ResponseParser {
    /// Tries, in order: the whole reply, a ```json block, any fenced block,
    /// and finally the first complete JSON value in the text.
    pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T, AiProviderError> {
        let trimmed = content.trim();
        if let Ok(parsed) = serde_json::from_str::<T>(trimmed) {
            return Ok(parsed);
        }

        let candidates = [
            Self::extract_fenced_block(trimmed, Some("json")),
            Self::extract_fenced_block(trimmed, None),
            Self::extract_first_json_value(trimmed),
        ];

        candidates
            .into_iter()
            .flatten()
            .find_map(|json| serde_json::from_str::<T>(&json).ok())
            .ok_or_else(|| AiProviderError::SerializationError("No valid JSON object in suggestion response".to_string()))
    }

    pub fn extract_first_json_value(content: &str) -> Option<String> {
        content
            .char_indices()
            .filter(|(_, ch)| *ch == '{' || *ch == '[')
            .find_map(|(idx, _)| {
                let candidate = &content[idx..];
                let mut values = serde_json::Deserializer::from_str(candidate).into_iter::<serde_json::Value>();
                match values.next() {
                    Some(Ok(_)) => Some(candidate[..values.byte_offset()].to_string()),
                    _ => None,
                }
            })
    }

    fn extract_fenced_block(content: &str, language: Option<&str>) -> Option<String> {
        const FENCE: &str = "```";
        let mut search = content;

        loop {
            let start = search.find(FENCE)?;
            let after_start = &search[start + FENCE.len()..];
            let line_end = after_start.find('\n')?;
            let tag = after_start[..line_end].trim();
            let rest = &after_start[line_end + 1..];

            if let Some(expected) = language {
                if !tag.eq_ignore_ascii_case(expected) {
                    search = after_start;
                    continue;
                }
            }

            let end = rest.find(FENCE)?;
            return Some(rest[..end].trim().to_string());
        }
    }
}
