//! Client for a running parser endpoint

use anyhow::{Context, Result};
use gw_core::{Dialect, ServerConfig};

use crate::cli::{GlobalArgs, RemoteArgs};
use crate::commands::common::{load_config, read_document};
use crate::commands::serve::{ParseRequest, ParseResponse, API_KEY_HEADER};

/// Posts parse requests to a `gw serve` endpoint.
///
/// A response with `success: false` is an error whatever its status code.
pub(crate) struct ParserClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ParserClient {
    pub(crate) fn new(endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self::with_http(reqwest::Client::new(), endpoint, api_key)
    }

    pub(crate) fn with_http(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// Send one request and return the compiled SQL.
    pub(crate) async fn parse(&self, request: &ParseRequest) -> Result<String> {
        let mut builder = self.http.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.endpoint))?;
        let status = response.status();
        let body: ParseResponse = response
            .json()
            .await
            .with_context(|| format!("Unreadable response from {} ({status})", self.endpoint))?;

        if !body.success {
            anyhow::bail!("Parse failed ({status}): {}", body.data);
        }
        log::debug!("Parsed remotely at {}", self.endpoint);
        Ok(body.data)
    }
}

/// Execute the remote command
pub async fn execute(args: &RemoteArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let endpoint = args
        .url
        .clone()
        .unwrap_or_else(|| default_endpoint(&config.server));
    let api_key = args.api_key.clone().or(config.server.api_key);

    let request = build_request(args)?;
    let sql = ParserClient::new(endpoint, api_key).parse(&request).await?;
    println!("{sql}");
    Ok(())
}

/// Endpoint a `gw serve` with the same config listens on
fn default_endpoint(server: &ServerConfig) -> String {
    format!("http://{}:{}{}", server.host, server.port, server.path)
}

fn build_request(args: &RemoteArgs) -> Result<ParseRequest> {
    let query = serde_json::from_str(&read_document(&args.workflow)?)
        .context("Workflow document is not valid JSON")?;
    let meta = match &args.meta {
        Some(arg) => Some(
            serde_json::from_str(&read_document(arg)?)
                .context("Field metadata is not valid JSON")?,
        ),
        None => None,
    };

    Ok(ParseRequest {
        table: args.table.clone(),
        query,
        meta,
        dialect: args.dialect.map(|d| Dialect::from(d).to_string()),
    })
}

#[cfg(test)]
#[path = "remote_test.rs"]
mod tests;
