//! Parser endpoint server using axum

use anyhow::{Context, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use gw_compile::DslCompiler;
use gw_core::{Config, Dataset, Dialect, Workflow};
use gw_sql::SqlParser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::cli::{GlobalArgs, ServeArgs};
use crate::commands::common::load_config;

/// Header carrying the API key when one is configured
pub(crate) const API_KEY_HEADER: &str = "kanaries-api-key";

/// State shared across all handlers
pub(crate) struct AppState {
    /// Compiler for requests that do not name a dialect
    compiler: DslCompiler,
    api_key: Option<String>,
}

impl AppState {
    pub(crate) fn new(dialect: Dialect, api_key: Option<String>) -> Self {
        Self {
            compiler: DslCompiler::new(dialect),
            api_key,
        }
    }
}

/// Body of a parse request
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ParseRequest {
    /// Table the workflow runs against
    pub table: String,
    /// The workflow document
    pub query: serde_json::Value,
    /// Field metadata; accepted but not used for compilation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialect: Option<String>,
}

/// Body of every response: the SQL on success, the error message otherwise
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct ParseResponse {
    pub data: String,
    pub success: bool,
}

impl ParseResponse {
    fn ok(sql: String) -> (StatusCode, Json<Self>) {
        (
            StatusCode::OK,
            Json(Self {
                data: sql,
                success: true,
            }),
        )
    }

    fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<Self>) {
        (
            status,
            Json(Self {
                data: message.into(),
                success: false,
            }),
        )
    }
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let (addr, app) = build(args, config)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    println!("Serving parser endpoint at http://{addr}");
    println!("Press Ctrl+C to stop.\n");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    Ok(())
}

/// Resolve the bind address and router from config plus CLI overrides.
fn build(args: &ServeArgs, config: Config) -> Result<(SocketAddr, Router)> {
    let server = config.server;
    let host = args.host.clone().unwrap_or(server.host);
    let port = args.port.unwrap_or(server.port);
    let dialect = args.dialect.map(Dialect::from).unwrap_or(config.dialect);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .context("Invalid host:port")?;

    log::info!(
        "Parser endpoint {} using {} dialect (api key {})",
        server.path,
        dialect,
        if server.api_key.is_some() { "required" } else { "not required" }
    );

    let state = Arc::new(AppState::new(dialect, server.api_key));
    Ok((addr, router(&server.path, state)))
}

pub(crate) fn router(path: &str, state: Arc<AppState>) -> Router {
    Router::new()
        .route(path, post(parse_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub(crate) async fn parse_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<ParseRequest>, JsonRejection>,
) -> (StatusCode, Json<ParseResponse>) {
    if let Some(expected) = &state.api_key {
        let given = headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        if given != Some(expected.as_str()) {
            log::warn!("Rejected parse request with a missing or wrong API key");
            return ParseResponse::error(StatusCode::UNAUTHORIZED, "invalid api key");
        }
    }

    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return ParseResponse::error(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    match compile_request(&state, request) {
        Ok(sql) => ParseResponse::ok(sql),
        Err(message) => {
            log::debug!("Parse request failed: {message}");
            ParseResponse::error(StatusCode::BAD_REQUEST, message)
        }
    }
}

fn compile_request(state: &AppState, request: ParseRequest) -> Result<String, String> {
    let workflow = Workflow::from_value(request.query).map_err(|e| e.to_string())?;
    let dataset = Dataset::table(request.table);
    if let Some(meta) = &request.meta {
        log::debug!("Ignoring {} bytes of field metadata", meta.to_string().len());
    }

    match request.dialect.as_deref().filter(|d| !d.is_empty()) {
        Some(name) => {
            let parser = SqlParser::from_dialect_name(name).map_err(|e| e.to_string())?;
            DslCompiler::with_parser(parser).compile(&dataset, &workflow)
        }
        None => state.compiler.compile(&dataset, &workflow),
    }
    .map_err(|e| e.to_string())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
#[path = "serve_test.rs"]
mod tests;
