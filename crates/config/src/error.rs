//! Error types for bootstrap and configuration resolution.
//!
//! Responsibilities:
//! - Define error variants for every resolution failure mode.
//! - Carry enough context (names, keys, paths) to act on without a debugger.
//!
//! Does NOT handle:
//! - Dynamic name resolution errors (see `groundwork-registry`).
//!
//! Invariants:
//! - Loader parse failures keep their own typed variants; they are never
//!   folded into `UnknownConfiguration`.
//! - `UnknownConfiguration` is the only variant the forgiving load path and
//!   the logging fallback are permitted to catch.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during bootstrapping and configuration lookup.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No bootstrap marker file anywhere between the working directory and
    /// the filesystem root. Fatal; there is no project to resolve against.
    #[error("cannot find {basename} in directory hierarchy")]
    MissingBootstrap { basename: String },

    /// No candidate file exists for a logical configuration name across the
    /// search paths.
    #[error("no configuration file found for name '{name}'")]
    UnknownConfiguration { name: String },

    /// A file was resolved but no registered loader matches its extension.
    #[error("no configuration loader found for path '{}'", path.display())]
    UnknownLoader { path: PathBuf },

    /// Direct store lookup missed; chained resolution uses this internally
    /// as "try the next layer".
    #[error("no such key in configuration store: '{key}'")]
    KeyNotFound { key: String },

    /// Chained resolution exhausted the store and every chain member.
    #[error("no such attribute: '{key}'")]
    AttributeNotFound { key: String },

    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}' as YAML", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse '{}' as JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The document parsed, but configuration requires a mapping at the top
    /// level.
    #[error("'{}' is not a mapping document", path.display())]
    NotAMapping { path: PathBuf },
}
