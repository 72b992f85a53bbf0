//! Configuration loading tests

use std::fs;

use container_exporter::cli::Cli;
use container_exporter::config::StaticConfig;
use container_exporter::errors::ExporterError;
use tempfile::TempDir;

#[test]
fn test_load_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exporter.toml");
    fs::write(
        &path,
        r#"
[server]
bind_address = "127.0.0.1:9100"
workers = 2

[collector]
read_timeout_ms = 250

[logging]
level = "debug"
format = "json"
"#,
    )
    .unwrap();

    let config = StaticConfig::load(path.to_str()).unwrap();
    assert_eq!(config.server.socket_address(), "127.0.0.1:9100");
    assert_eq!(config.server.workers, 2);
    assert_eq!(config.collector.read_timeout().as_millis(), 250);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exporter.toml");
    fs::write(&path, "[collector]\nread_timeout_ms = 0\n").unwrap();

    let config = StaticConfig::load(path.to_str()).unwrap();
    assert_eq!(config.server.bind_address, ":9009");
    assert!(config.collector.read_timeout().is_zero());
    assert_eq!(config.logging.format, "text");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.toml");
    let result = StaticConfig::load(path.to_str());
    assert!(matches!(result, Err(ExporterError::Config(_))));
}

#[test]
fn test_invalid_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exporter.toml");
    fs::write(&path, "[logging]\nformat = \"yaml\"\n").unwrap();
    let result = StaticConfig::load(path.to_str());
    assert!(matches!(result, Err(ExporterError::Config(_))));
}

#[test]
fn test_cli_overrides_take_precedence() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exporter.toml");
    fs::write(&path, "[server]\nbind_address = \"127.0.0.1:9100\"\n").unwrap();

    let cli = Cli {
        bind_address: Some(":9200".to_string()),
        config: path.to_str().map(String::from),
        log_level: Some("warn".to_string()),
        generate_config: false,
    };
    let config = cli.load_config().unwrap();
    assert_eq!(config.server.socket_address(), "0.0.0.0:9200");
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_cli_parses_short_bind_flag() {
    use clap::Parser;

    let cli = Cli::try_parse_from(["container-exporter", "-b", "127.0.0.1:9300"]).unwrap();
    assert_eq!(cli.bind_address.as_deref(), Some("127.0.0.1:9300"));
    assert!(cli.config.is_none());
    assert!(!cli.generate_config);
}
