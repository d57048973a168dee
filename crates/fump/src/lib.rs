#![deny(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod app;
pub mod common;

pub use app::Application;
pub use app::WorkFn;
pub use app::commands::LogMode;
pub use app::commands::RunConfig;
pub use app::exit_codes;
pub use common::telemetry::Telemetry;
pub use common::telemetry::TelemetryError;
