#![deny(clippy::all)]

pub mod format;
pub mod log_config;
pub mod telemetry;

#[cfg(test)]
pub(crate) mod test_support;

pub use format::CRITICAL_TARGET;
pub use log_config::LogFileConfig;
pub use telemetry::Telemetry;
pub use telemetry::TelemetryError;
