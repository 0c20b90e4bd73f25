//! Command dispatch: bridges CLI args -> coordinator operations -> output formatting.

pub mod admin;
pub mod config_cmd;
pub mod health;
pub mod players;
pub mod util;

use scoreboard_api::PlayerClient;
use scoreboard_core::Coordinator;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    coordinator: &Coordinator<PlayerClient>,
    settings: &Settings,
) -> Result<(), CliError> {
    match cmd {
        Command::Players(args) => players::handle(coordinator, args, settings).await,
        Command::Admin => admin::handle(coordinator, settings).await,
        Command::Health => health::handle(coordinator.store(), settings).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
