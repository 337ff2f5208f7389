//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use gw_core::Config;
use std::path::Path;

use crate::cli::GlobalArgs;

/// Load `--config` when given, else `./gw.yml` if present, else defaults.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config from {path}")),
        None => Config::load_from_dir_or_default(Path::new("."))
            .context("Failed to load gw.yml from the current directory"),
    }
}

/// Resolve a document argument: `@path` reads the file, anything else is
/// taken as inline JSON.
pub(crate) fn read_document(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {path}")),
        None => Ok(arg.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_inline_document() {
        assert_eq!(read_document(r#"{"workflow": []}"#).unwrap(), r#"{"workflow": []}"#);
    }

    #[test]
    fn test_read_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wf.json");
        std::fs::write(&path, r#"{"workflow": []}"#).unwrap();

        let arg = format!("@{}", path.display());
        assert_eq!(read_document(&arg).unwrap(), r#"{"workflow": []}"#);
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_document("@/nonexistent/wf.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/wf.json"));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yml");
        std::fs::write(&path, "dialect: duckdb\nserver:\n  port: 9000\n").unwrap();

        let global = GlobalArgs {
            verbose: false,
            config: Some(path.display().to_string()),
        };
        let config = load_config(&global).unwrap();
        assert_eq!(config.dialect, gw_core::Dialect::DuckDb);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_load_missing_explicit_config() {
        let global = GlobalArgs {
            verbose: false,
            config: Some("/nonexistent/gw.yml".to_string()),
        };
        assert!(load_config(&global).is_err());
    }
}
