//! Command execution.

pub mod check;
pub mod paths;
pub mod show;

use groundwork_config::Bootstrap;

use crate::args::Commands;

/// Dispatch a parsed command against the bootstrapped project.
pub fn run(command: &Commands, bootstrap: &Bootstrap) -> anyhow::Result<()> {
    match command {
        Commands::Show { name, json } => show::execute(bootstrap, name, *json),
        Commands::Paths => paths::print_paths(bootstrap),
        Commands::Root => paths::print_root(bootstrap),
        Commands::Check { name } => check::execute(bootstrap, name),
    }
}
