pub mod ai_provider_error;
pub mod analysis_status;
pub mod commands;
pub mod language;
pub mod sandbox_error;
pub mod severity;
pub mod test_type;
pub mod vulnerability_kind;
