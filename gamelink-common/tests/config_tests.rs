//! Integration tests for config resolution and graceful degradation
//!
//! Tests that manipulate GAMELINK_CONFIG are marked with #[serial]
//! so they run sequentially, not in parallel.

use gamelink_common::config::{
    load_toml_config, ConfigResolver, ConfigSource, LoggingConfig, CONFIG_ENV_VAR,
};
use gamelink_common::Error;
use serde::Deserialize;
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
struct TestConfig {
    logging: LoggingConfig,
    label: Option<String>,
}

#[test]
#[serial]
fn test_resolver_with_no_overrides_uses_defaults() {
    env::remove_var(CONFIG_ENV_VAR);
    let empty_dir = TempDir::new().unwrap();

    let resolver = ConfigResolver::new().with_user_config_dir(Some(empty_dir.path().to_path_buf()));

    assert_eq!(resolver.resolve(), ConfigSource::Defaults);
}

#[test]
#[serial]
fn test_resolver_env_var_beats_user_file() {
    let user_dir = TempDir::new().unwrap();
    std::fs::write(user_dir.path().join("config.toml"), "label = \"user\"\n").unwrap();
    env::set_var(CONFIG_ENV_VAR, "/tmp/gamelink-env.toml");

    let resolver = ConfigResolver::new().with_user_config_dir(Some(user_dir.path().to_path_buf()));
    let source = resolver.resolve();

    env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(source, ConfigSource::Environment(PathBuf::from("/tmp/gamelink-env.toml")));
}

#[test]
#[serial]
fn test_resolver_cli_beats_env_var() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/gamelink-env.toml");

    let resolver = ConfigResolver::new().with_cli_path(Some(PathBuf::from("/tmp/gamelink-cli.toml")));
    let source = resolver.resolve();

    env::remove_var(CONFIG_ENV_VAR);
    assert_eq!(source, ConfigSource::CommandLine(PathBuf::from("/tmp/gamelink-cli.toml")));
}

#[test]
#[serial]
fn test_resolver_finds_user_file() {
    env::remove_var(CONFIG_ENV_VAR);
    let user_dir = TempDir::new().unwrap();
    let path = user_dir.path().join("config.toml");
    std::fs::write(&path, "label = \"user\"\n").unwrap();

    let resolver = ConfigResolver::new().with_user_config_dir(Some(user_dir.path().to_path_buf()));

    assert_eq!(resolver.resolve(), ConfigSource::UserFile(path));
}

#[test]
fn test_missing_file_degrades_to_defaults() {
    let dir = TempDir::new().unwrap();
    let source = ConfigSource::CommandLine(dir.path().join("does-not-exist.toml"));

    let config: TestConfig = load_toml_config(&source).unwrap();
    assert_eq!(config, TestConfig::default());
}

#[test]
fn test_existing_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gamelink.toml");
    std::fs::write(
        &path,
        "label = \"weekly\"\n\n[logging]\nlevel = \"debug\"\nansi = false\n",
    )
    .unwrap();

    let config: TestConfig = load_toml_config(&ConfigSource::CommandLine(path)).unwrap();
    assert_eq!(config.label.as_deref(), Some("weekly"));
    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.ansi);
}

#[test]
fn test_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "label = [unterminated\n").unwrap();

    let result: gamelink_common::Result<TestConfig> = load_toml_config(&ConfigSource::UserFile(path));
    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("broken.toml")),
        other => panic!("expected config error, got {:?}", other),
    }
}
