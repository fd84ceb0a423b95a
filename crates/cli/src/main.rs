//! Groundwork CLI - resolve project configuration from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Discover the project root and apply search-path / logging overrides
//!   before any lookup occurs.
//! - Execute resolution commands and map failures to structured exit
//!   codes.
//!
//! Does NOT handle:
//! - Resolution logic itself (see `groundwork-config`).
//!
//! Invariants:
//! - Path options are applied BEFORE logging is configured, so an
//!   overridden search path list also governs where the logging
//!   configuration file is found.

mod args;
mod commands;
mod error;

use args::{Cli, apply_path_options};
use clap::Parser;
use error::{ExitCode, ExitCodeExt};
use groundwork_config::{Bootstrap, configure_logging};

fn main() {
    let cli = Cli::parse();

    let mut bootstrap = match Bootstrap::discover() {
        Ok(bootstrap) => bootstrap,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(ExitCode::from(&e).as_i32());
        }
    };

    apply_path_options(&mut bootstrap, &cli);

    if let Err(e) = configure_logging(&bootstrap) {
        eprintln!("failed to configure logging: {e}");
        std::process::exit(ExitCode::GeneralError.as_i32());
    }

    let exit_code = match commands::run(&cli.command, &bootstrap) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{e:#}");
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
