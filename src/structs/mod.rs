pub mod aggregate_result;
pub mod ai;
pub mod cli;
pub mod code_unit;
pub mod config;
pub mod dynamic_outcome;
pub mod error_response;
pub mod execution_output;
pub mod file_analysis_result;
pub mod multi_file_request;
pub mod multi_file_response;
pub mod pen_test_request;
pub mod pen_test_response;
pub mod sandbox;
pub mod security_suggestion;
pub mod vulnerability;
pub mod vulnerability_report;
