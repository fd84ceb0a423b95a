//! Project bootstrapping and configuration resolution for Groundwork.
//!
//! This crate locates a project root by walking up to the bootstrap marker
//! file, maintains an ordered search path list rooted there, and resolves
//! logical configuration names to parsed files through an extension-keyed
//! loader registry. Loaded configuration is wrapped in layered
//! [`Configuration`] objects whose lookups fall back through a chain and
//! whose writes shadow, never mutate, the layers below.

pub mod constants;

mod bootstrap;
mod configuration;
mod error;
mod finder;
mod helpers;
mod loader;
mod logging;
mod search_path;

pub use bootstrap::Bootstrap;
pub use configuration::{
    AttributeSource, ChainLink, Component, Configuration, MissingPolicy, component_logger_name,
    load_configuration, logger_name, resolve_chained,
};
pub use error::ConfigError;
pub use finder::{FindFiles, find_files};
pub use helpers::ConfigurableClass;
pub use loader::{ConfigMap, LoaderFn, LoaderRegistry, read_json_path, read_yaml_path};
pub use logging::{
    LogFormat, LoggingSettings, configure_logging, find_logging_configuration, get_logger,
    initialize_simple_logging, logging_is_configured,
};
pub use search_path::{PathTransform, SearchPathList};
