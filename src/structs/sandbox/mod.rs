pub mod create_sandbox_response;
pub mod execute_request;
pub mod execute_response;
