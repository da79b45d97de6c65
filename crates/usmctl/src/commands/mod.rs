//! Command dispatch: bridges CLI args -> core operation sets -> output formatting.

pub mod jobs;
pub mod keys;
pub mod license;
pub mod sensors;
pub mod util;

use usm_config::Config;
use usm_core::ControlPlane;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a control-plane command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    plane: &ControlPlane,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<(), CliError> {
    match cmd {
        Command::Sensors(args) => sensors::handle(plane, args, global, cfg).await,
        Command::Keys(args) => keys::handle(plane, args, global).await,
        Command::Jobs(args) => jobs::handle(plane, args, global).await,
        Command::License(args) => license::handle(plane, args, global).await,
        // Handled before connecting
        Command::Completions(_) => Ok(()),
    }
}
