//! Config loading tests.
//!
//! Tests for `ConfigLoader` against files on disk: nested tables, unknown
//! field rejection and validation after load.

use serde::Deserialize;
use std::fs;
use tempfile::TempDir;
use vts_common::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};
use vts_common::hal::types::PowerOnMode;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct BenchConfig {
    shared: SharedConfig,
    #[serde(default)]
    power_on_mode: PowerOnMode,
}

#[test]
fn test_load_nested_config_from_dir() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bench.toml");
    fs::write(
        &path,
        r#"
power_on_mode = "stepped"

[shared]
log_level = "debug"
service_name = "bench-01"
"#,
    )
    .unwrap();

    let config = BenchConfig::load(&path).unwrap();
    assert_eq!(config.shared.log_level, LogLevel::Debug);
    assert_eq!(config.shared.service_name, "bench-01");
    assert_eq!(config.power_on_mode, PowerOnMode::Stepped);
    assert!(config.shared.validate().is_ok());
}

#[test]
fn test_power_on_mode_defaults_to_immediate() {
    let config = BenchConfig::from_toml_str("[shared]\nservice_name = \"bench\"\n").unwrap();
    assert_eq!(config.power_on_mode, PowerOnMode::Immediate);
}

#[test]
fn test_unknown_fields_rejected() {
    let result = BenchConfig::from_toml_str(
        "cycle_time_us = 1000\n[shared]\nservice_name = \"bench\"\n",
    );
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_directory_path_is_parse_error_not_missing() {
    let dir = TempDir::new().unwrap();
    let result = BenchConfig::load(dir.path());
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_empty_service_name_fails_validation() {
    let config = BenchConfig::from_toml_str("[shared]\nservice_name = \"\"\n").unwrap();
    assert!(matches!(
        config.shared.validate(),
        Err(ConfigError::ValidationError(_))
    ));
}
