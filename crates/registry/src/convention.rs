//! Convention-based name loading.
//!
//! Responsibilities:
//! - Validate a name-formatting template at construction time.
//! - Map short names to registered values through the template.
//! - Compose a loader with a downstream callback (`harness_loader`) so
//!   resolution and use stay independently testable.
//!
//! Invariants:
//! - A template contains exactly one substitution marker and is non-empty;
//!   anything else is rejected before a loader exists.

use std::sync::Arc;

use crate::{Entry, Registry, RegistryError};

/// Substitution marker expected exactly once in a convention template.
pub const TEMPLATE_MARKER: &str = "{}";

/// Maps short names to registered values via a fully-qualified-name
/// template.
///
/// A template like `"app.codecs.{}_codec"` turns the short name `"line"`
/// into a lookup of `"app.codecs.line_codec"`.
#[derive(Clone)]
pub struct ConventionLoader {
    registry: Arc<Registry>,
    template: String,
}

impl ConventionLoader {
    /// Build a loader bound to `registry` and `template`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::Template` if `template` is empty, has no
    /// substitution marker, or has more than one.
    pub fn new(registry: Arc<Registry>, template: impl Into<String>) -> Result<Self, RegistryError> {
        let template = template.into();
        validate_template(&template)?;
        Ok(Self { registry, template })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// The fully-qualified name `name` expands to under this template.
    pub fn format(&self, name: &str) -> String {
        self.template.replacen(TEMPLATE_MARKER, name, 1)
    }

    /// Resolve `name` through the template.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::UnknownName` if the expanded name was never
    /// registered.
    pub fn load(&self, name: &str) -> Result<Entry, RegistryError> {
        self.registry.get_by_fqn(&self.format(name))
    }
}

impl std::fmt::Debug for ConventionLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConventionLoader")
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

fn validate_template(template: &str) -> Result<(), RegistryError> {
    if template.is_empty() {
        return Err(RegistryError::Template {
            template: template.to_string(),
            reason: "template is empty",
        });
    }
    match template.matches(TEMPLATE_MARKER).count() {
        1 => Ok(()),
        0 => Err(RegistryError::Template {
            template: template.to_string(),
            reason: "missing substitution marker",
        }),
        _ => Err(RegistryError::Template {
            template: template.to_string(),
            reason: "more than one substitution marker",
        }),
    }
}

/// Compose a convention loader with a callback over the resolved entry.
///
/// The returned harness resolves `name`, hands the entry and any extra
/// arguments to `callback`, and returns the callback's result. Resolution
/// failures short-circuit before the callback runs.
pub fn harness_loader<T, R>(
    loader: ConventionLoader,
    callback: impl Fn(Entry, &[T]) -> R,
) -> impl Fn(&str, &[T]) -> Result<R, RegistryError> {
    move |name, extra| Ok(callback(loader.load(name)?, extra))
}
