//! End-to-end resolution across a bootstrapped project tree.
//!
//! These tests exercise the full path from marker discovery through search
//! path priority to loaded configuration, the way an application would use
//! the crate.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tempfile::TempDir;

use groundwork_config::{
    Bootstrap, ChainLink, Component, ConfigError, Configuration, MissingPolicy,
    constants::BOOTSTRAP_BASENAME, read_json_path,
};

fn project(marker: &str) -> (TempDir, Bootstrap) {
    let tmp = TempDir::new().expect("tempdir");
    fs::write(tmp.path().join(BOOTSTRAP_BASENAME), marker).expect("marker");
    let bootstrap = Bootstrap::discover_from(tmp.path()).expect("discovered");
    (tmp, bootstrap)
}

/// Two search directories both hold `thing.yaml`; the higher-priority one
/// wins, and editing only that file changes what loads — without touching
/// the lower-priority copy.
#[test]
fn test_higher_priority_path_wins_and_is_live() {
    let (tmp, mut bootstrap) = project("");
    let lower = tmp.path().join("defaults");
    let higher = tmp.path().join("overrides");
    fs::create_dir(&lower).expect("mkdir");
    fs::create_dir(&higher).expect("mkdir");
    fs::write(lower.join("thing.yaml"), "source: defaults\n").expect("write");
    fs::write(higher.join("thing.yaml"), "source: overrides\n").expect("write");

    bootstrap.search_paths_mut().replace(["overrides", "defaults"]);

    let found = bootstrap.find_configuration_file("thing").expect("found");
    assert!(found.starts_with(bootstrap.normalize_path(Path::new("overrides"))));

    let config = bootstrap.get_configuration("thing").expect("loads");
    assert_eq!(config.get("source"), Some(&Value::from("overrides")));

    // No caching: editing the winning file is immediately visible.
    fs::write(higher.join("thing.yaml"), "source: edited\n").expect("rewrite");
    let config = bootstrap.get_configuration("thing").expect("reloads");
    assert_eq!(config.get("source"), Some(&Value::from("edited")));

    let untouched = fs::read_to_string(lower.join("thing.yaml")).expect("read");
    assert_eq!(untouched, "source: defaults\n");
}

/// Marker-declared search paths drive resolution without any manual list
/// mutation.
#[test]
fn test_marker_declared_search_paths() {
    let (tmp, bootstrap) = project("search_paths:\n  - config\n  - .\n");
    fs::create_dir(tmp.path().join("config")).expect("mkdir");
    fs::write(tmp.path().join("config").join("app.yaml"), "from: config\n").expect("write");
    fs::write(tmp.path().join("app.yaml"), "from: root\n").expect("write");

    let config = bootstrap.get_configuration("app").expect("loads");
    assert_eq!(config.get("from"), Some(&Value::from("config")));
}

/// Extension priority: a name with no extension prefers the earlier
/// registered extension when both candidate files exist in one directory.
#[test]
fn test_extension_priority_within_a_directory() {
    let (tmp, mut bootstrap) = project("");
    fs::write(tmp.path().join("app.yaml"), "format: yaml\n").expect("write");
    fs::write(tmp.path().join("app.json"), r#"{"format": "json"}"#).expect("write");

    bootstrap.loaders_mut().register("json", read_json_path);

    let config = bootstrap.get_configuration("app").expect("loads");
    assert_eq!(config.get("format"), Some(&Value::from("yaml")));

    // An explicit extension bypasses candidate expansion entirely.
    let config = bootstrap.get_configuration("app.json").expect("loads");
    assert_eq!(config.get("format"), Some(&Value::from("json")));
}

struct Service;
impl Component for Service {
    const NAME: &'static str = "service";
}

struct Metrics;
impl Component for Metrics {
    const NAME: &'static str = "metrics";
    const ON_MISSING: MissingPolicy = MissingPolicy::Forgiving;
}

/// A component layered over a forgiving one composes file contents with
/// live defaults.
#[test]
fn test_component_layering_end_to_end() {
    let (tmp, bootstrap) = project("");
    fs::write(tmp.path().join("service.yaml"), "port: 8080\n").expect("write");

    let defaults = Configuration::load::<Metrics>(&bootstrap).expect("forgiving");
    defaults.set("sample_rate", 0.1);

    let service = Configuration::load_chained::<Service>(
        &bootstrap,
        vec![Arc::new(defaults.clone()) as ChainLink],
    )
    .expect("loads");

    assert_eq!(service.resolve("port").expect("own file"), Value::from(8080));
    assert_eq!(service.resolve("sample_rate").expect("chained"), Value::from(0.1));

    // Overrides shadow the chain; the defaults layer stays untouched.
    service.set("sample_rate", 0.5);
    assert_eq!(service.resolve("sample_rate").expect("shadowed"), Value::from(0.5));
    assert_eq!(defaults.get("sample_rate").expect("untouched"), Value::from(0.1));
}

/// Strict loading of an absent name surfaces `UnknownConfiguration` from
/// the component layer down to the file finder.
#[test]
fn test_unknown_configuration_propagates() {
    let (_tmp, bootstrap) = project("");
    let err = Configuration::load::<Service>(&bootstrap).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownConfiguration { name } if name == "service"));
}
