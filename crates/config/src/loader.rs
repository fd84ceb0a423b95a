//! Extension-keyed configuration loaders.
//!
//! Responsibilities:
//! - Keep an ordered registry of `(extension, loader)` pairs; order defines
//!   priority when several candidate files could satisfy a logical name.
//! - Compute candidate basenames for a logical configuration name.
//! - Match a resolved path to its loader and parse the file.
//!
//! Does NOT handle:
//! - Locating files across search paths (see `finder`).
//! - Deciding that a missing file is an error (see `bootstrap`).
//!
//! Invariants:
//! - Extensions are unique within a registry; re-registering one replaces
//!   its loader in place without changing priority.
//! - Loaders are pure path-to-mapping functions; their parse failures
//!   propagate as their own error variants.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ConfigError;

/// Parsed configuration contents: a mutable string-keyed mapping.
pub type ConfigMap = serde_json::Map<String, Value>;

/// A configuration loader: parse the file at a path into a mapping.
pub type LoaderFn = fn(&Path) -> Result<ConfigMap, ConfigError>;

/// Ordered mapping from file extension to loader function.
#[derive(Clone)]
pub struct LoaderRegistry {
    entries: Vec<(String, LoaderFn)>,
}

impl LoaderRegistry {
    /// An empty registry. Most callers want [`LoaderRegistry::standard`].
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// The standard registry: YAML only. Additional extensions (such as
    /// [`read_json_path`] under `"json"`) can be registered on top.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register("yaml", read_yaml_path);
        registry
    }

    /// Register `loader` for `extension` (without the leading dot).
    ///
    /// A new extension is appended at the lowest priority; an existing one
    /// has its loader replaced in place.
    pub fn register(&mut self, extension: impl Into<String>, loader: LoaderFn) {
        let extension = extension.into();
        if let Some(entry) = self.entries.iter_mut().find(|(ext, _)| *ext == extension) {
            entry.1 = loader;
        } else {
            self.entries.push((extension, loader));
        }
    }

    /// Registered extensions, in priority order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(ext, _)| ext.as_str())
    }

    /// Candidate file basenames for a logical configuration name.
    ///
    /// A name `"storage"` expands to one candidate per registered
    /// extension, in registry order: `["storage.yaml", ...]`. A name that
    /// already ends in a registered extension passes through unchanged as
    /// the only candidate.
    pub fn possible_basenames(&self, name: &str) -> Vec<String> {
        let mut candidates = Vec::with_capacity(self.entries.len());
        for (extension, _) in &self.entries {
            let suffix = format!(".{extension}");
            if name.ends_with(&suffix) {
                return vec![name.to_string()];
            }
            candidates.push(format!("{name}{suffix}"));
        }
        candidates
    }

    /// The loader whose extension matches `path`, checked in registry
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownLoader` if no registered extension
    /// matches.
    pub fn loader_for(&self, path: &Path) -> Result<LoaderFn, ConfigError> {
        let name = path.to_string_lossy();
        for (extension, loader) in &self.entries {
            if name.ends_with(&format!(".{extension}")) {
                return Ok(*loader);
            }
        }
        Err(ConfigError::UnknownLoader { path: path.to_path_buf() })
    }

    /// Parse the configuration file at `path` with its matching loader.
    pub fn load(&self, path: &Path) -> Result<ConfigMap, ConfigError> {
        self.loader_for(path)?(path)
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for LoaderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.extensions()).finish()
    }
}

/// Load a YAML mapping document into a [`ConfigMap`].
///
/// A null document (for example an empty file) counts as an empty mapping;
/// any other non-mapping document is a `NotAMapping` error.
pub fn read_yaml_path(path: &Path) -> Result<ConfigMap, ConfigError> {
    let text = read_file(path)?;
    let value: Value = serde_yaml::from_str(&text)
        .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })?;
    into_mapping(value, path)
}

/// Load a JSON object document into a [`ConfigMap`].
///
/// Not registered by default; register under `"json"` to enable.
pub fn read_json_path(path: &Path) -> Result<ConfigMap, ConfigError> {
    let text = read_file(path)?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;
    into_mapping(value, path)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
}

fn into_mapping(value: Value, path: &Path) -> Result<ConfigMap, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(ConfigMap::new()),
        _ => Err(ConfigError::NotAMapping { path: path.to_path_buf() }),
    }
}

/// Parse a YAML settings document into `T`, treating a null document as
/// `T::default()`. Used for the bootstrap marker and logging settings.
pub(crate) fn read_yaml_settings<T>(path: &Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned + Default,
{
    let text = read_file(path)?;
    let value: serde_yaml::Value = serde_yaml::from_str(&text)
        .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })?;
    if value.is_null() {
        return Ok(T::default());
    }
    serde_yaml::from_value(value)
        .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_possible_basenames_appends_each_extension_in_order() {
        let mut registry = LoaderRegistry::standard();
        registry.register("json", read_json_path);
        assert_eq!(registry.possible_basenames("storage"), ["storage.yaml", "storage.json"]);
    }

    #[test]
    fn test_possible_basenames_passthrough_for_registered_extension() {
        let mut registry = LoaderRegistry::standard();
        registry.register("json", read_json_path);
        assert_eq!(registry.possible_basenames("storage.json"), ["storage.json"]);
        assert_eq!(registry.possible_basenames("storage.yaml"), ["storage.yaml"]);
    }

    #[test]
    fn test_possible_basenames_is_idempotent() {
        let registry = LoaderRegistry::standard();
        let first = registry.possible_basenames("storage");
        let second = registry.possible_basenames("storage");
        assert_eq!(first, second);
    }

    #[test]
    fn test_unregistered_extension_is_not_passthrough() {
        let registry = LoaderRegistry::standard();
        // ".conf" is not registered, so it is treated as part of the name.
        assert_eq!(registry.possible_basenames("app.conf"), ["app.conf.yaml"]);
    }

    #[test]
    fn test_loader_for_unknown_extension() {
        let registry = LoaderRegistry::standard();
        let err = registry.loader_for(Path::new("/etc/app.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLoader { .. }));
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = LoaderRegistry::standard();
        registry.register("json", read_json_path);
        registry.register("yaml", read_json_path);
        // Replacing the yaml loader must not demote its priority.
        assert_eq!(registry.extensions().collect::<Vec<_>>(), ["yaml", "json"]);
    }

    #[test]
    fn test_read_yaml_mapping() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("app.yaml");
        fs::write(&path, "workers: 4\nname: demo\n").expect("write");

        let map = read_yaml_path(&path).expect("mapping");
        assert_eq!(map.get("workers"), Some(&Value::from(4)));
        assert_eq!(map.get("name"), Some(&Value::from("demo")));
    }

    #[test]
    fn test_read_yaml_null_document_is_empty_mapping() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("empty.yaml");
        fs::write(&path, "").expect("write");

        let map = read_yaml_path(&path).expect("empty mapping");
        assert!(map.is_empty());
    }

    #[test]
    fn test_read_yaml_rejects_non_mapping_document() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("list.yaml");
        fs::write(&path, "- one\n- two\n").expect("write");

        let err = read_yaml_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { .. }));
    }

    #[test]
    fn test_read_json_object() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("app.json");
        fs::write(&path, r#"{"workers": 4}"#).expect("write");

        let map = read_json_path(&path).expect("mapping");
        assert_eq!(map.get("workers"), Some(&Value::from(4)));
    }

    #[test]
    fn test_load_dispatches_by_extension_priority() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("app.yaml");
        fs::write(&path, "k: v\n").expect("write");

        let mut registry = LoaderRegistry::standard();
        registry.register("json", read_json_path);
        let map = registry.load(&path).expect("loaded");
        assert_eq!(map.get("k"), Some(&Value::from("v")));
    }

    #[test]
    fn test_parse_failure_is_typed_not_unknown_configuration() {
        let tmp = TempDir::new().expect("tempdir");
        let path = tmp.path().join("bad.yaml");
        fs::write(&path, "k: [unclosed\n").expect("write");

        let err = LoaderRegistry::standard().load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }
}
