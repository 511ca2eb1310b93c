pub const SUGGESTION_SYSTEM_PROMPT: &str = "You are a cybersecurity expert specializing in secure coding practices. \
Always provide complete, working code solutions. Return only valid JSON.";

pub const SUGGESTION_RESPONSE_FORMAT: &str = r#"Please provide:
1. A detailed explanation of why this is a security issue
2. A corrected version of the COMPLETE code with the vulnerability fixed
3. Prevention tips to avoid this vulnerability in the future

Format your response as JSON with these fields:
{
  "explanation": "detailed explanation",
  "fixedCode": "complete corrected code",
  "preventionTips": ["tip1", "tip2", "tip3"]
}"#;
