//! Command dispatch: bridges CLI args -> coordinator calls -> output formatting.

pub mod classify;
pub mod config_cmd;
pub mod markers;
pub mod search;
pub mod show;
pub mod sites;
pub mod util;
pub mod zoom;

use vaxmap_core::Coordinator;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    coordinator: &Coordinator,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    match cmd {
        Command::Sites(args) => sites::handle(coordinator, &args, global, cfg).await,
        Command::Search(args) => search::handle(coordinator, args, global, cfg).await,
        Command::Show(args) => show::handle(coordinator, args, global).await,
        Command::Markers(args) => markers::handle(coordinator, &args, global, cfg).await,
        // Config, Completions, Classify and Zoom are handled before dispatch
        Command::Config(_) | Command::Completions(_) | Command::Classify(_) | Command::Zoom(_) => {
            Err(CliError::Internal {
                message: "offline command reached backend dispatch".into(),
            })
        }
    }
}
