//! Command dispatch: bridges CLI args -> core operations -> output formatting.

pub mod apps;
pub mod config_cmd;
pub mod domains;
pub mod orgs;
pub mod routes;
pub mod services;
pub mod spaces;
pub mod util;

use cfops_core::Operations;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a foundation-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, ops: &Operations, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Orgs(args) => orgs::handle(ops, args, global).await,
        Command::Spaces(args) => spaces::handle(ops, args, global).await,
        Command::Apps(args) => apps::handle(ops, args, global).await,
        Command::Services(args) => services::handle(ops, args, global).await,
        Command::Routes(args) => routes::handle(ops, args, global).await,
        Command::Domains(args) => domains::handle(ops, args, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not need a foundation connection".into(),
        )),
    }
}
