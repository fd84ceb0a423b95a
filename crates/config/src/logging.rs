//! Logging bootstrap: file-driven initialization with a default fallback.
//!
//! Responsibilities:
//! - Locate the logging configuration file across the search paths
//!   (bounded to the first match).
//! - Initialize the `tracing` subscriber from that file, or fall back to
//!   the default initializer when no file exists.
//!
//! Does NOT handle:
//! - Deciding the logging basename (see `Bootstrap`, marker file, CLI).
//!
//! Invariants:
//! - A missing logging configuration file is one of the two sanctioned
//!   recovery points: it selects the default initializer instead of
//!   failing. Any other error propagates.
//! - Initialization happens at most once per process; later calls are
//!   no-ops.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Deserialize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::bootstrap::Bootstrap;
use crate::constants::DEFAULT_LOGGING_FILTER;
use crate::error::ConfigError;
use crate::finder::find_files;
use crate::loader::read_yaml_settings;

static LOGGING_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Contents of the logging configuration file.
#[derive(Debug, Default, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, e.g. `"info,groundwork_config=debug"`.
    /// Falls back to `RUST_LOG`, then the default filter.
    pub filter: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

/// Output format for the fmt layer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Json,
}

/// Whether [`configure_logging`] has already run.
pub fn logging_is_configured() -> bool {
    LOGGING_CONFIGURED.load(Ordering::SeqCst)
}

/// The path to the logging configuration file, if one exists.
///
/// Searches the bootstrap's search paths for its logging basename,
/// bounded to the first match.
///
/// # Errors
///
/// Returns `ConfigError::UnknownConfiguration` when no search path holds
/// the file.
pub fn find_logging_configuration(bootstrap: &Bootstrap) -> Result<PathBuf, ConfigError> {
    find_files([bootstrap.logging_basename()], bootstrap.search_paths().as_slice(), Some(1))
        .next()
        .ok_or_else(|| ConfigError::UnknownConfiguration {
            name: bootstrap.logging_basename().to_string(),
        })
}

/// Configure the `tracing` subscriber.
///
/// Looks for the logging configuration file and initializes from it; when
/// the file is absent, the default initializer runs instead, so some
/// reasonable logging configuration is guaranteed either way. Subsequent
/// calls are no-ops.
///
/// # Errors
///
/// Returns any error other than the file being absent: unreadable or
/// unparseable settings still fail loudly.
pub fn configure_logging(bootstrap: &Bootstrap) -> Result<(), ConfigError> {
    if logging_is_configured() {
        return Ok(());
    }
    match find_logging_configuration(bootstrap) {
        Ok(path) => {
            let settings: LoggingSettings = read_yaml_settings(&path)?;
            init_subscriber(&settings);
            tracing::debug!(path = %path.display(), "logging configured from file");
        }
        Err(ConfigError::UnknownConfiguration { .. }) => initialize_simple_logging(),
        Err(other) => return Err(other),
    }
    LOGGING_CONFIGURED.store(true, Ordering::SeqCst);
    Ok(())
}

/// The default logging initializer: fmt layer with `RUST_LOG` directives
/// or the default filter.
pub fn initialize_simple_logging() {
    init_subscriber(&LoggingSettings::default());
}

/// A span identifying a component, configuring logging first if needed.
///
/// Component code should enter spans from here (or via
/// [`crate::configuration::logger_name`] composition) rather than
/// installing its own subscriber, so the bootstrap's configuration always
/// applies first.
pub fn get_logger(bootstrap: &Bootstrap, name: &str) -> Result<tracing::Span, ConfigError> {
    configure_logging(bootstrap)?;
    Ok(tracing::info_span!("component", component = name))
}

fn init_subscriber(settings: &LoggingSettings) {
    let filter = settings
        .filter
        .as_deref()
        .map(EnvFilter::new)
        .unwrap_or_else(default_filter);
    let registry = tracing_subscriber::registry().with(filter);
    let result = match settings.format {
        LogFormat::Full => registry.with(fmt::layer()).try_init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };
    // A subscriber installed earlier (tests, embedding applications) wins.
    if result.is_err() {
        tracing::debug!("global subscriber already installed; keeping it");
    }
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOGGING_FILTER))
}
