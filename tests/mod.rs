mod common;

mod dynamic_tests;
mod ingestion_tests;
mod risk_aggregator_tests;
mod suggestion_tests;
