pub mod config;
pub mod error;
pub mod property;
pub mod reports;
pub mod retry;
pub mod savings;
pub mod sessions;
pub mod telemetry;
