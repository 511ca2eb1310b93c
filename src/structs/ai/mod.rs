pub mod ai_fix_response;
pub mod openai;
