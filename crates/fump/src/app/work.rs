//! What the program actually does. Extend [`run`]; return a non-zero code for
//! expected failures and an error for anything that should abort the run.

use anyhow::Result;
use tracing::debug;
use tracing::info;

use crate::app::commands::RunConfig;
use crate::app::exit_codes;

pub fn run(config: &RunConfig) -> Result<i32> {
    debug!(fix_arg = config.fix_arg(), "starting work");

    info!("Did something...");

    Ok(exit_codes::SUCCESS)
}
