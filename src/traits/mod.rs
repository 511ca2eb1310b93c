pub mod ai_provider;
pub mod sandbox_provider;
