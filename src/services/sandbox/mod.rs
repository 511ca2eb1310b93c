pub mod daytona;
pub mod lease;
