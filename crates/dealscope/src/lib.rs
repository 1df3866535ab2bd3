pub mod config;
pub mod error;
pub mod rehab;
pub mod telemetry;
pub mod underwriting;
