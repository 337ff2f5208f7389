//! gw CLI - compile Graphic Walker workflows into SQL

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, GlobalArgs};
use commands::{compile, remote, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match &cli.command {
        cli::Commands::Compile(args) => compile::execute(args, &cli.global).await,
        cli::Commands::Serve(args) => serve::execute(args, &cli.global).await,
        cli::Commands::Remote(args) => remote::execute(args, &cli.global).await,
    }
}

/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting
/// to warnings only.
fn init_logging(global: &GlobalArgs) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if global.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    let _ = builder.try_init();
}
