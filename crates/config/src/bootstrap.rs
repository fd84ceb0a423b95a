//! Project root discovery and the resolution context.
//!
//! Responsibilities:
//! - Walk up from a starting directory until the bootstrap marker file is
//!   found; the directory holding it is the project root.
//! - Apply the marker file's declarative settings (search paths, logging
//!   basename) before any lookup happens.
//! - Carry the search path list and loader registry, and expose the
//!   name-to-file resolution entry points built on them.
//!
//! Does NOT handle:
//! - Logging initialization (see `logging`).
//! - The configuration object model (see `configuration`).
//!
//! Invariants:
//! - Search paths are normalized against the project root at write time:
//!   `~` expands to the home directory, relative paths resolve under the
//!   root, and `.`/`..` components are removed lexically.
//! - Resolution always re-reads the filesystem; nothing is cached between
//!   calls.

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::constants::{BOOTSTRAP_BASENAME, DEFAULT_LOGGING_CONFIG_BASENAME, DEFAULT_SEARCH_PATHS};
use crate::error::ConfigError;
use crate::finder::{FindFiles, find_files};
use crate::loader::{ConfigMap, LoaderRegistry, read_yaml_settings};
use crate::search_path::{PathTransform, SearchPathList};

/// Declarative settings read from the bootstrap marker file.
///
/// The marker may be empty (the file then only marks the project root);
/// any setting present overrides the corresponding default.
#[derive(Debug, Default, Deserialize)]
struct MarkerSettings {
    /// Replaces the default search path list, in priority order.
    search_paths: Option<Vec<String>>,
    /// Overrides the logging configuration basename.
    logging_config: Option<String>,
}

/// The resolution context: project root, search paths, and loaders.
///
/// Constructed once at startup and passed to everything that resolves
/// configuration, so there is no process-wide mutable state to race on.
#[derive(Debug, Clone)]
pub struct Bootstrap {
    root: PathBuf,
    marker: PathBuf,
    search_paths: SearchPathList,
    loaders: LoaderRegistry,
    logging_basename: String,
}

impl Bootstrap {
    /// Discover the project root by walking up from the working directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingBootstrap` if no marker file exists
    /// anywhere up to the filesystem root.
    pub fn discover() -> Result<Self, ConfigError> {
        let start = std::env::current_dir()
            .map_err(|source| ConfigError::Io { path: PathBuf::from("."), source })?;
        Self::discover_from(&start)
    }

    /// Discover the project root by walking up from `start`.
    pub fn discover_from(start: &Path) -> Result<Self, ConfigError> {
        let (root, marker) = find_marker(start)?;
        tracing::debug!(root = %root.display(), "discovered project root");

        let mut search_paths = SearchPathList::new(root_transform(root.clone()));
        search_paths.extend(DEFAULT_SEARCH_PATHS.iter().map(Path::new));

        let mut bootstrap = Self {
            root,
            marker,
            search_paths,
            loaders: LoaderRegistry::standard(),
            logging_basename: DEFAULT_LOGGING_CONFIG_BASENAME.to_string(),
        };
        bootstrap.apply_marker_settings()?;
        Ok(bootstrap)
    }

    fn apply_marker_settings(&mut self) -> Result<(), ConfigError> {
        let settings: MarkerSettings = read_yaml_settings(&self.marker)?;
        if let Some(paths) = settings.search_paths {
            self.search_paths.replace(paths.iter().map(Path::new));
        }
        if let Some(basename) = settings.logging_config {
            self.logging_basename = basename;
        }
        Ok(())
    }

    /// The directory containing the bootstrap marker file.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The bootstrap marker file itself.
    pub fn marker_path(&self) -> &Path {
        &self.marker
    }

    pub fn search_paths(&self) -> &SearchPathList {
        &self.search_paths
    }

    pub fn search_paths_mut(&mut self) -> &mut SearchPathList {
        &mut self.search_paths
    }

    pub fn loaders(&self) -> &LoaderRegistry {
        &self.loaders
    }

    pub fn loaders_mut(&mut self) -> &mut LoaderRegistry {
        &mut self.loaders
    }

    pub fn logging_basename(&self) -> &str {
        &self.logging_basename
    }

    pub fn set_logging_basename(&mut self, basename: impl Into<String>) {
        self.logging_basename = basename.into();
    }

    /// Normalize a path the same way the search path list does.
    pub fn normalize_path(&self, path: &Path) -> PathBuf {
        normalize_against(&self.root, path)
    }

    /// Every matching configuration file for `name`, best match first.
    ///
    /// Candidates come from [`LoaderRegistry::possible_basenames`]; each
    /// search path contributes at most its highest-priority match.
    pub fn find_configuration_files(&self, name: &str) -> FindFiles<'_> {
        find_files(self.loaders.possible_basenames(name), self.search_paths.as_slice(), None)
    }

    /// The best-matching configuration file for `name`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownConfiguration` if no candidate file
    /// exists in any search path.
    pub fn find_configuration_file(&self, name: &str) -> Result<PathBuf, ConfigError> {
        self.find_configuration_files(name)
            .next()
            .ok_or_else(|| ConfigError::UnknownConfiguration { name: name.to_string() })
    }

    /// Parse the configuration file at `path` with its matching loader.
    pub fn load_configuration_file(&self, path: &Path) -> Result<ConfigMap, ConfigError> {
        self.loaders.load(path)
    }

    /// Find and parse the best configuration for `name`.
    ///
    /// Goes to the filesystem on every call; manage any caching in the
    /// manner best suited to your problem domain.
    pub fn get_configuration(&self, name: &str) -> Result<ConfigMap, ConfigError> {
        self.load_configuration_file(&self.find_configuration_file(name)?)
    }
}

fn find_marker(start: &Path) -> Result<(PathBuf, PathBuf), ConfigError> {
    let mut current = std::path::absolute(start)
        .map_err(|source| ConfigError::Io { path: start.to_path_buf(), source })?;
    loop {
        let candidate = current.join(BOOTSTRAP_BASENAME);
        if candidate.is_file() {
            return Ok((current, candidate));
        }
        if !current.pop() {
            return Err(ConfigError::MissingBootstrap { basename: BOOTSTRAP_BASENAME.to_string() });
        }
    }
}

fn root_transform(root: PathBuf) -> PathTransform {
    Arc::new(move |path: &Path| normalize_against(&root, path))
}

/// Expand `~`, resolve relative paths under `root`, and remove `.`/`..`
/// components lexically. Purely lexical so paths need not exist yet.
pub(crate) fn normalize_against(root: &Path, path: &Path) -> PathBuf {
    let expanded = expand_user(path);
    let joined = if expanded.is_absolute() { expanded } else { root.join(expanded) };
    clean_components(&joined)
}

fn expand_user(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(dirs) = directories::BaseDirs::new()
    {
        return dirs.home_dir().join(rest);
    }
    path.to_path_buf()
}

fn clean_components(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // ".." above the root stays put; above a relative start it
                // is preserved so the path still means the same place.
                if !cleaned.pop() && !path.has_root() {
                    cleaned.push(Component::ParentDir);
                }
            }
            other => cleaned.push(other),
        }
    }
    cleaned
}
