use super::*;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.dialect, Dialect::Postgres);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 2334);
    assert_eq!(config.server.path, "/dataset/parser");
    assert!(config.server.api_key.is_none());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
dialect: duckdb
server:
  host: 0.0.0.0
  port: 8080
  path: /parse
  api_key: secret
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.dialect, Dialect::DuckDb);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.path, "/parse");
    assert_eq!(config.server.api_key.as_deref(), Some("secret"));
}

#[test]
fn test_unknown_field_rejected() {
    let result: Result<Config, _> = serde_yaml::from_str("dialekt: postgres");
    assert!(result.is_err());
}

#[test]
fn test_dialect_display() {
    assert_eq!(Dialect::Postgres.to_string(), "postgres");
    assert_eq!(Dialect::DuckDb.to_string(), "duckdb");
    assert_eq!(Dialect::Generic.to_string(), "generic");
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("gw.yml"), "dialect: generic\n").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.dialect, Dialect::Generic);
}

#[test]
fn test_load_from_dir_yaml_extension() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("gw.yaml"), "server:\n  port: 9000\n").unwrap();

    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.server.port, 9000);
}

#[test]
fn test_load_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load_from_dir(dir.path());
    assert!(matches!(result, Err(CoreError::ConfigNotFound { .. })));

    let config = Config::load_from_dir_or_default(dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_server_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gw.yml");
    std::fs::write(&path, "server:\n  path: parse\n").unwrap();

    let result = Config::load(&path);
    assert!(matches!(result, Err(CoreError::ConfigInvalid { .. })));
}

#[test]
fn test_empty_api_key_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gw.yml");
    std::fs::write(&path, "server:\n  api_key: \"\"\n").unwrap();

    let result = Config::load(&path);
    assert!(matches!(result, Err(CoreError::ConfigInvalid { .. })));
}

#[test]
fn test_malformed_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gw.yml");
    std::fs::write(&path, "server: [unclosed\n").unwrap();

    let result = Config::load(&path);
    assert!(matches!(result, Err(CoreError::ConfigParseError(_))));
}
