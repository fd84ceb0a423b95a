//! Error types for dynamic name resolution.
//!
//! Invariants:
//! - Resolution failures always name the offending FQN or type.
//! - Template violations are reported at loader construction, never
//!   deferred to first use.

use thiserror::Error;

/// Errors that can occur during name registration and resolution.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("no registered value for name '{fqn}'")]
    UnknownName { fqn: String },

    #[error("no registered name for type '{type_name}'")]
    UnknownType { type_name: &'static str },

    #[error("registered value for '{fqn}' is not a {expected}")]
    TypeMismatch { fqn: String, expected: &'static str },

    #[error("invalid convention template '{template}': {reason}")]
    Template { template: String, reason: &'static str },
}
