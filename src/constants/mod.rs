pub mod execution_signatures;
pub mod prompts;
pub mod rule_catalog;
