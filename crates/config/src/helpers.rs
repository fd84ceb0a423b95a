//! Configuration-backed class selection.
//!
//! Responsibilities:
//! - Bind a configuration key to a dynamic-name lookup so a component's
//!   pluggable implementation can be chosen (and overridden) from
//!   configuration.
//!
//! Invariants:
//! - Reads consult the local store only, never the chain; chain layers
//!   that want to supply the class do so by shadowing the key.
//! - A null, empty-string, or non-string stored value selects the default;
//!   with no default, the binding reads as `None`.

use std::any::Any;

use serde_json::Value;

use crate::configuration::Configuration;
use groundwork_registry::{Entry, Registry, RegistryError};

/// Binds a configuration key to a registry lookup.
///
/// Reading yields the registered value named by the stored string (or by
/// the default name when the key is unset). Writing stores the value's
/// fully-qualified name, or a null marker to clear the selection.
#[derive(Debug, Clone)]
pub struct ConfigurableClass {
    key: String,
    default: Option<String>,
}

impl ConfigurableClass {
    /// Bind `key` with no default: an unset key reads as `None`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), default: None }
    }

    /// Bind `key`, falling back to the value registered under `default`
    /// when the key is unset.
    pub fn with_default(key: impl Into<String>, default: impl Into<String>) -> Self {
        Self { key: key.into(), default: Some(default.into()) }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resolve the currently selected value.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownName` if the effective name (stored
    /// or default) was never registered.
    pub fn get(
        &self,
        config: &Configuration,
        registry: &Registry,
    ) -> Result<Option<Entry>, RegistryError> {
        let stored = match config.get(&self.key) {
            Ok(Value::String(name)) if !name.is_empty() => Some(name),
            _ => None,
        };
        let effective = match stored.or_else(|| self.default.clone()) {
            Some(name) => name,
            None => return Ok(None),
        };
        registry.get_by_fqn(&effective).map(Some)
    }

    /// Store the fully-qualified name of `value` under the bound key, or a
    /// null marker when `value` is `None`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownType` if `value`'s type was never
    /// registered (an unregistered value has no name to store).
    pub fn set(
        &self,
        config: &Configuration,
        registry: &Registry,
        value: Option<&dyn Any>,
    ) -> Result<(), RegistryError> {
        match value {
            Some(value) => {
                let fqn = registry.fqn_of_value(value)?;
                config.set(self.key.clone(), Value::String(fqn));
            }
            None => config.set(self.key.clone(), Value::Null),
        }
        Ok(())
    }
}
