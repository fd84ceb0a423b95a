//! Dynamic name resolution for Groundwork.
//!
//! This crate maps dotted fully-qualified names to live values through an
//! explicit registry populated at process startup. Components declare the
//! pluggable values they provide under stable names; configuration then
//! selects among them by string, and `get_by_fqn` turns that string back
//! into the registered value.
//!
//! Responsibilities:
//! - Associate fully-qualified names with shared values and their types.
//! - Resolve names back to typed values (`get_by_fqn` + `Entry::downcast`).
//! - Produce the name for a registered type or value (`fqn_of`,
//!   `fqn_of_value`).
//! - Build name-formatting convention loaders and harness compositions
//!   (see `convention`).
//!
//! Does NOT handle:
//! - Configuration file lookup or parsing (see `groundwork-config`).
//! - Instantiating registered values; entries hold shared values, and what
//!   a value *is* (a factory, a plugin descriptor, a constant) is up to the
//!   registering component.

mod convention;
mod error;

pub use convention::{ConventionLoader, TEMPLATE_MARKER, harness_loader};
pub use error::RegistryError;

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

/// A resolved registry entry: a shared value plus the name it was
/// registered under.
#[derive(Clone)]
pub struct Entry {
    fqn: Arc<str>,
    type_id: TypeId,
    value: Arc<dyn Any + Send + Sync>,
}

impl Entry {
    /// The fully-qualified name this entry was registered under.
    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    /// The `TypeId` of the registered value.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Downcast the entry to a shared handle of its concrete type.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::TypeMismatch` if the entry holds a value of
    /// a different type.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Result<Arc<T>, RegistryError> {
        Arc::clone(&self.value)
            .downcast::<T>()
            .map_err(|_| RegistryError::TypeMismatch {
                fqn: self.fqn.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Borrow the entry's value as its concrete type, if it matches.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref()
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry").field("fqn", &self.fqn).finish_non_exhaustive()
    }
}

/// Explicit mapping from fully-qualified names to registered values.
///
/// Populated once at startup, then consulted read-only by resolution. A
/// name registered twice keeps the latest value; a type registered under
/// several names reports the latest name from `fqn_of`.
#[derive(Default)]
pub struct Registry {
    by_fqn: HashMap<String, Entry>,
    by_type: HashMap<TypeId, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under `fqn`, returning the entry created for it.
    pub fn register<T: Any + Send + Sync>(&mut self, fqn: impl Into<String>, value: T) -> Entry {
        let fqn = fqn.into();
        let entry = Entry {
            fqn: Arc::from(fqn.as_str()),
            type_id: TypeId::of::<T>(),
            value: Arc::new(value),
        };
        self.by_type.insert(TypeId::of::<T>(), fqn.clone());
        self.by_fqn.insert(fqn, entry.clone());
        entry
    }

    /// Resolve a fully-qualified name to its registered entry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownName` if nothing was registered under
    /// `fqn`. Resolution is exact: there is no partial or best-effort match.
    pub fn get_by_fqn(&self, fqn: &str) -> Result<Entry, RegistryError> {
        self.by_fqn
            .get(fqn)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownName { fqn: fqn.to_string() })
    }

    pub fn contains(&self, fqn: &str) -> bool {
        self.by_fqn.contains_key(fqn)
    }

    /// The fully-qualified name registered for type `T`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownType` if no value of type `T` was
    /// registered.
    pub fn fqn_of<T: Any>(&self) -> Result<String, RegistryError> {
        self.by_type
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or(RegistryError::UnknownType {
                type_name: std::any::type_name::<T>(),
            })
    }

    /// The fully-qualified name registered for `value`'s runtime type.
    pub fn fqn_of_value(&self, value: &dyn Any) -> Result<String, RegistryError> {
        self.by_type
            .get(&value.type_id())
            .cloned()
            .ok_or(RegistryError::UnknownType {
                type_name: "<runtime value>",
            })
    }

    pub fn len(&self) -> usize {
        self.by_fqn.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fqn.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.by_fqn.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("names", &names).finish()
    }
}
