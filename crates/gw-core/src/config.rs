//! Configuration types and parsing for gw.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Top-level configuration from gw.yml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// SQL dialect used to parse sub-query datasets
    #[serde(default)]
    pub dialect: Dialect,

    /// Parser endpoint settings for `gw serve`
    #[serde(default)]
    pub server: ServerConfig,
}

/// Network front end configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Route the parser endpoint is mounted on
    #[serde(default = "default_path")]
    pub path: String,

    /// When set, requests must carry it in the `kanaries-api-key` header
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
            api_key: None,
        }
    }
}

/// SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// PostgreSQL dialect
    #[default]
    Postgres,
    /// DuckDB dialect
    DuckDb,
    /// Generic ANSI-ish dialect
    Generic,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::DuckDb => write!(f, "duckdb"),
            Dialect::Generic => write!(f, "generic"),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    2334
}

fn default_path() -> String {
    "/dataset/parser".to_string()
}

/// File names searched for, in order, by [`Config::load_from_dir`]
pub const CONFIG_FILE_NAMES: [&str; 2] = ["gw.yml", "gw.yaml"];

impl Config {
    /// Read and validate a config file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => CoreError::ConfigNotFound {
                path: display.clone(),
            },
            _ => CoreError::IoWithPath {
                path: display.clone(),
                source,
            },
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        log::debug!("Loaded config from {display}");
        Ok(config)
    }

    /// Load the first of [`CONFIG_FILE_NAMES`] present in `dir`
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
        {
            Some(found) => Self::load(&found),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Like [`load_from_dir`](Self::load_from_dir), but falls back to the
    /// defaults when no config file exists.
    pub fn load_from_dir_or_default(dir: &Path) -> CoreResult<Self> {
        match Self::load_from_dir(dir) {
            Err(CoreError::ConfigNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    fn validate(&self) -> CoreResult<()> {
        let server = &self.server;
        let problem = if !server.path.starts_with('/') {
            Some(format!("server.path must start with '/', got '{}'", server.path))
        } else if server.host.trim().is_empty() {
            Some("server.host must not be empty".to_string())
        } else if server.api_key.as_deref() == Some("") {
            Some("server.api_key must not be empty when set".to_string())
        } else {
            None
        };
        match problem {
            Some(message) => Err(CoreError::ConfigInvalid { message }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
