//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish
//!   failure modes.
//! - Map `ConfigError` variants to appropriate exit codes.
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use groundwork_config::ConfigError;

/// Structured exit codes for the groundwork binary.
///
/// These let scripts distinguish "not a project" from "name does not
/// resolve" without parsing stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// No bootstrap marker file anywhere in the directory hierarchy.
    ///
    /// Scripts should run from inside a project, or create the marker.
    MissingBootstrap = 2,

    /// The requested configuration name does not resolve to a file, or a
    /// resolved file has no loader.
    NotFound = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingBootstrap { .. } => ExitCode::MissingBootstrap,
            ConfigError::UnknownConfiguration { .. } | ConfigError::UnknownLoader { .. } => {
                ExitCode::NotFound
            }
            _ => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// The appropriate exit code for this error.
    ///
    /// Returns `ExitCode::GeneralError` unless a `ConfigError` is found in
    /// the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
        }
        ExitCode::GeneralError
    }
}
