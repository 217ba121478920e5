//! Command dispatch: bridges CLI args -> core registrations -> output formatting.

pub mod config_cmd;
pub mod deploy;
pub mod info;

use sitelift_core::EngineConfig;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an engine-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    config: EngineConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Deploy(args) => deploy::handle(config, args, global).await,
        Command::Info => info::handle(config, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
