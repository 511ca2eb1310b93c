use crate::constants::prompts::SUGGESTION_RESPONSE_FORMAT;
use crate::enums::language::Language;
use crate::structs::vulnerability::Vulnerability;

/// Builds the user prompt for one finding: the full source plus the finding's record.
pub fn generate_suggestion_prompt(code: &str, language: Language, vulnerability: &Vulnerability) -> String {
    let mut prompt = format!(
        "You are a security expert analyzing code vulnerabilities.\n\nORIGINAL CODE ({lang}):\n```{lang}\n{code}\n```\n\n",
        lang = language,
        code = code
    );

    prompt.push_str("VULNERABILITY DETECTED:\n");
    prompt.push_str(&format!("- Type: {}\n", vulnerability.kind));
    prompt.push_str(&format!("- Severity: {}\n", vulnerability.severity));
    prompt.push_str(&format!("- Description: {}\n", vulnerability.description));
    prompt.push_str(&format!("- Location: {}\n", vulnerability.location.as_deref().unwrap_or("Unknown")));
    if let Some(cwe) = &vulnerability.cwe {
        prompt.push_str(&format!("- CWE: {}\n", cwe));
    }

    prompt.push('\n');
    prompt.push_str(SUGGESTION_RESPONSE_FORMAT);
    prompt
}
