//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use gw_core::Dialect;

/// gw - compile Graphic Walker workflows into SQL
#[derive(Parser, Debug)]
#[command(name = "gw")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a gw.yml config file (default: ./gw.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a workflow against a dataset and print the SQL
    Compile(CompileArgs),

    /// Serve the parser endpoint over HTTP
    Serve(ServeArgs),

    /// Compile through a running parser endpoint
    Remote(RemoteArgs),
}

/// Arguments for the compile command
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Dataset document as JSON, or @path to read it from a file
    #[arg(long, conflicts_with = "table", required_unless_present = "table")]
    pub dataset: Option<String>,

    /// Shortcut for a table dataset with this name
    #[arg(short, long)]
    pub table: Option<String>,

    /// Workflow document as JSON, or @path to read it from a file
    #[arg(short, long)]
    pub workflow: String,

    /// Override the sub-query dialect
    #[arg(short, long, value_enum)]
    pub dialect: Option<DialectArg>,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the bind host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port
    #[arg(long)]
    pub port: Option<u16>,

    /// Override the default sub-query dialect
    #[arg(short, long, value_enum)]
    pub dialect: Option<DialectArg>,
}

/// Arguments for the remote command
#[derive(Args, Debug)]
pub struct RemoteArgs {
    /// Parser endpoint URL (default: built from the server config)
    #[arg(long)]
    pub url: Option<String>,

    /// API key sent in the kanaries-api-key header
    #[arg(long, env = "GW_API_KEY")]
    pub api_key: Option<String>,

    /// Table the workflow runs against
    #[arg(short, long)]
    pub table: String,

    /// Workflow document as JSON, or @path to read it from a file
    #[arg(short, long)]
    pub workflow: String,

    /// Field metadata as JSON, or @path to read it from a file
    #[arg(long)]
    pub meta: Option<String>,

    /// Sub-query dialect requested from the server
    #[arg(short, long, value_enum)]
    pub dialect: Option<DialectArg>,
}

/// Sub-query dialects selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectArg {
    Postgres,
    Duckdb,
    Generic,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Duckdb => Dialect::DuckDb,
            DialectArg::Generic => Dialect::Generic,
        }
    }
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
