//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Apply the search-path and logging options to a discovered bootstrap.
//!
//! Non-responsibilities:
//! - Does not execute commands (see the `commands` module).
//! - Does not discover the project root (see `groundwork_config::Bootstrap`).

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use groundwork_config::Bootstrap;

#[derive(Parser)]
#[command(name = "groundwork")]
#[command(about = "Locate a project root and resolve configuration across its search paths", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  groundwork show storage\n  groundwork --search-path overrides:. show storage\n  groundwork --prepend /etc/myapp paths\n  groundwork --log-config observability.yaml check storage\n"
)]
pub struct Cli {
    /// Replace the search path list (colon-separated directories)
    #[arg(short = 's', long, global = true, env = "GROUNDWORK_SEARCH_PATH", value_name = "PATHS")]
    pub search_path: Option<String>,

    /// Prepend a directory to the search path list (highest priority)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub prepend: Option<PathBuf>,

    /// Append a directory to the search path list (lowest priority)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub append: Option<PathBuf>,

    /// Override the logging configuration basename
    #[arg(short = 'l', long, global = true, env = "GROUNDWORK_LOG_CONFIG", value_name = "BASENAME")]
    pub log_config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a configuration name and print the parsed contents
    Show {
        /// Logical configuration name (extension optional)
        name: String,

        /// Print as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },

    /// Print the effective search path list, highest priority first
    Paths,

    /// Print the discovered project root
    Root,

    /// Check whether a configuration name resolves (exit code only)
    Check {
        /// Logical configuration name (extension optional)
        name: String,
    },
}

/// Apply the global path and logging options to the bootstrap.
///
/// Replacement runs before prepend/append so the three compose the way
/// they read on the command line.
pub fn apply_path_options(bootstrap: &mut Bootstrap, cli: &Cli) {
    if let Some(spec) = &cli.search_path {
        bootstrap
            .search_paths_mut()
            .replace(spec.split(':').filter(|segment| !segment.is_empty()).map(Path::new));
    }
    if let Some(dir) = &cli.prepend {
        bootstrap.search_paths_mut().prepend(dir);
    }
    if let Some(dir) = &cli.append {
        bootstrap.search_paths_mut().append(dir);
    }
    if let Some(basename) = &cli.log_config {
        bootstrap.set_logging_basename(basename.clone());
    }
}
