//! Layered configuration objects with chained fallback.
//!
//! Responsibilities:
//! - Wrap a loaded configuration mapping in a mutable store with an
//!   ordered, immutable chain of fallback attribute sources.
//! - Resolve keys store-first, then chain members in declared order.
//! - Provide copy-on-write layering (`hot_copy`) and named, trait-driven
//!   loading (`Component`).
//!
//! Does NOT handle:
//! - Finding or parsing configuration files (see `bootstrap` / `loader`).
//!
//! Invariants:
//! - A store is owned exclusively by its layer; a hot copy always starts
//!   with a fresh empty store.
//! - The chain is fixed at construction.
//! - Writes always land in the local store, never in a chain member, even
//!   when the key currently resolves through the chain. Shadow, never
//!   mutate.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;

use crate::bootstrap::Bootstrap;
use crate::error::ConfigError;
use crate::loader::ConfigMap;

/// A fallback source of named values consulted during chained resolution.
///
/// Chain members are duck-typed: other [`Configuration`] layers resolve
/// recursively, plain mappings answer from their entries, and anything
/// else can implement this to serve as a defaults provider.
pub trait AttributeSource: Send + Sync {
    fn attribute(&self, key: &str) -> Option<Value>;
}

/// A shared chain member.
pub type ChainLink = Arc<dyn AttributeSource>;

impl AttributeSource for ConfigMap {
    fn attribute(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

impl AttributeSource for std::collections::HashMap<String, Value> {
    fn attribute(&self, key: &str) -> Option<Value> {
        self.get(key).cloned()
    }
}

/// Whether a missing configuration file fails a component load or yields
/// an empty store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Propagate `UnknownConfiguration`.
    Strict,
    /// Substitute an empty mapping; the component supplies its own
    /// defaults.
    Forgiving,
}

/// A named, loadable component configuration.
///
/// `NAME` is the logical configuration name the component loads, and the
/// prefix for its logger identifiers. Making it an associated const means
/// a component cannot forget to declare it.
pub trait Component {
    const NAME: &'static str;
    const ON_MISSING: MissingPolicy = MissingPolicy::Strict;
}

/// One configuration layer: a mutable store plus fallback chain.
///
/// Cloning produces another handle to the same layer, which is what lets a
/// hot copy keep reading its original's live state.
#[derive(Clone)]
pub struct Configuration {
    store: Arc<RwLock<ConfigMap>>,
    chain: Arc<[ChainLink]>,
}

impl Configuration {
    /// Wrap `store` with the given fallback chain.
    pub fn new(store: ConfigMap, chain: Vec<ChainLink>) -> Self {
        Self { store: Arc::new(RwLock::new(store)), chain: chain.into() }
    }

    /// An empty layer with no chain.
    pub fn empty() -> Self {
        Self::new(ConfigMap::new(), Vec::new())
    }

    /// Load the configuration named by `C::NAME` and wrap it, with no
    /// chain.
    pub fn load<C: Component>(bootstrap: &Bootstrap) -> Result<Self, ConfigError> {
        Self::load_chained::<C>(bootstrap, Vec::new())
    }

    /// Load the configuration named by `C::NAME` and wrap it with `chain`.
    pub fn load_chained<C: Component>(
        bootstrap: &Bootstrap,
        chain: Vec<ChainLink>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(load_configuration::<C>(bootstrap)?, chain))
    }

    /// Read `key` from the local store only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::KeyNotFound` if the store lacks `key`; the
    /// chain is not consulted.
    pub fn get(&self, key: &str) -> Result<Value, ConfigError> {
        self.store_read()
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::KeyNotFound { key: key.to_string() })
    }

    /// Write `key` into the local store.
    ///
    /// The write shadows any chain-supplied value for the same key; chain
    /// members are never mutated through a layer above them.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        self.store_write().insert(key.into(), value.into());
    }

    /// Resolve `key` through the store, then each chain member in order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::AttributeNotFound` once the store and every
    /// chain member have missed.
    pub fn resolve(&self, key: &str) -> Result<Value, ConfigError> {
        resolve_chained(&self.store_read(), &self.chain, key)
    }

    /// The fallback chain, in consultation order.
    pub fn chain(&self) -> &[ChainLink] {
        &self.chain
    }

    /// A copy of the local store's current contents.
    pub fn snapshot(&self) -> ConfigMap {
        self.store_read().clone()
    }

    /// A new layer with an empty store, chained solely to this one.
    ///
    /// The copy is write-isolated: mutating it never affects this layer.
    /// Reads on the copy fall through to this layer's *live* state, so
    /// later writes here remain visible through the copy.
    pub fn hot_copy(&self) -> Self {
        Self::new(ConfigMap::new(), vec![Arc::new(self.clone()) as ChainLink])
    }

    fn store_read(&self) -> RwLockReadGuard<'_, ConfigMap> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn store_write(&self) -> RwLockWriteGuard<'_, ConfigMap> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AttributeSource for Configuration {
    fn attribute(&self, key: &str) -> Option<Value> {
        self.resolve(key).ok()
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("store", &*self.store_read())
            .field("chain_len", &self.chain.len())
            .finish()
    }
}

/// The chain-walk itself: store first, then each member in order.
///
/// Kept as a plain function so the resolution order is testable without a
/// constructed layer.
pub fn resolve_chained(
    store: &ConfigMap,
    chain: &[ChainLink],
    key: &str,
) -> Result<Value, ConfigError> {
    if let Some(value) = store.get(key) {
        return Ok(value.clone());
    }
    for link in chain {
        if let Some(value) = link.attribute(key) {
            return Ok(value);
        }
    }
    Err(ConfigError::AttributeNotFound { key: key.to_string() })
}

/// The best configuration mapping available for component `C`.
///
/// Always goes to the filesystem; no caching takes place. Under
/// `MissingPolicy::Forgiving` a missing file yields an empty mapping;
/// every other error propagates either way.
pub fn load_configuration<C: Component>(bootstrap: &Bootstrap) -> Result<ConfigMap, ConfigError> {
    match bootstrap.get_configuration(C::NAME) {
        Err(ConfigError::UnknownConfiguration { .. })
            if C::ON_MISSING == MissingPolicy::Forgiving =>
        {
            Ok(ConfigMap::new())
        }
        other => other,
    }
}

/// Compose a hierarchical logger identifier from a component name and an
/// optional child: `"storage"` / `"storage.compaction"`.
pub fn component_logger_name(name: &str, child: Option<&str>) -> String {
    match child {
        Some(child) => format!("{name}.{child}"),
        None => name.to_string(),
    }
}

/// [`component_logger_name`] for a component type.
pub fn logger_name<C: Component>(child: Option<&str>) -> String {
    component_logger_name(C::NAME, child)
}
