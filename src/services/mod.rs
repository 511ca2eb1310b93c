pub mod ai_providers;
pub mod dynamic_executor;
pub mod ingestion;
pub mod pen_test_orchestrator;
pub mod rate_limiter;
pub mod risk_aggregator;
pub mod rule_engine;
pub mod sandbox;
pub mod suggestion_generator;
