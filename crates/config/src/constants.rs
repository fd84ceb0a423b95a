//! Centralized defaults for the Groundwork workspace.

/// Basename of the bootstrap marker file that identifies a project root.
pub const BOOTSTRAP_BASENAME: &str = "Groundwork.yaml";

/// Default basename of the logging configuration file, resolved across the
/// search paths. Overridable from the marker file or the command line.
pub const DEFAULT_LOGGING_CONFIG_BASENAME: &str = "logging.yaml";

/// Default search path list, relative to the project root.
pub const DEFAULT_SEARCH_PATHS: &[&str] = &["."];

/// Filter directives used when neither a logging configuration file nor
/// `RUST_LOG` supplies any.
pub const DEFAULT_LOGGING_FILTER: &str = "info";
