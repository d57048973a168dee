//! Bootstrap: command line, logging, then the work under a single failure guard.

use std::panic;
use std::panic::AssertUnwindSafe;

use anyhow::Context;
use anyhow::Result;
use tracing::error;

pub mod commands;
pub mod error;
pub mod work;

use crate::app::commands::RunConfig;
use crate::app::error::AbortError;
use crate::common::CRITICAL_TARGET;
use crate::common::Telemetry;
use crate::common::TelemetryError;

/// Process exit codes. Anything else is a code returned by the work itself.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// Malformed command line, reported by clap before logging exists.
    pub const USAGE: i32 = 2;
    /// Unhandled failure during the run.
    pub const ABORT: i32 = 3;
}

/// Signature of the program's work: a returned code is the exit code, an error
/// aborts the run.
pub type WorkFn = fn(&RunConfig) -> Result<i32>;

pub struct Application {
    work: WorkFn,
}

impl Application {
    pub fn new() -> Self {
        Self::with_work(work::run)
    }

    pub fn with_work(work: WorkFn) -> Self {
        Self { work }
    }

    /// Parses the command line (exiting on usage errors), sets up logging and
    /// runs the work. Returns the process exit code.
    pub fn run(&self) -> i32 {
        let config = RunConfig::parse_or_exit();
        let telemetry = Telemetry::init(config.log_mode());
        self.run_with(&config, telemetry)
    }

    /// Runs the work inside `telemetry`. A logging setup failure is reported
    /// like any other abort, through a default-mode logger on stderr.
    pub fn run_with(
        &self,
        config: &RunConfig,
        telemetry: std::result::Result<Telemetry, TelemetryError>,
    ) -> i32 {
        match telemetry {
            Ok(telemetry) => telemetry.in_scope(|| self.guarded(config)),
            Err(e) => {
                let error = anyhow::Error::new(e).context("failed to initialize logging");
                Telemetry::fallback().in_scope(|| report_abort(&error))
            }
        }
    }

    fn guarded(&self, config: &RunConfig) -> i32 {
        match self.invoke(config) {
            Ok(exit_code) => exit_code,
            Err(e) => report_abort(&e),
        }
    }

    fn invoke(&self, config: &RunConfig) -> Result<i32> {
        let work = self.work;
        match panic::catch_unwind(AssertUnwindSafe(|| work(config))) {
            Ok(result) => result.context("work failed"),
            Err(payload) => Err(AbortError::from_panic(payload).into()),
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

fn report_abort(error: &anyhow::Error) -> i32 {
    error!(
        target: CRITICAL_TARGET,
        "Abort, rc={}\n{:?}",
        exit_codes::ABORT,
        error
    );
    exit_codes::ABORT
}
