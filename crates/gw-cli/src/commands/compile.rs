//! Compile command implementation

use anyhow::{Context, Result};
use gw_compile::DslCompiler;
use gw_core::{Dataset, Dialect, Workflow};

use crate::cli::{CompileArgs, GlobalArgs};
use crate::commands::common::{load_config, read_document};

/// Execute the compile command
pub async fn execute(args: &CompileArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(global)?;
    let dialect = args.dialect.map(Dialect::from).unwrap_or(config.dialect);

    let sql = compile_documents(args, dialect)?;
    println!("{sql}");
    Ok(())
}

fn compile_documents(args: &CompileArgs, dialect: Dialect) -> Result<String> {
    let dataset = match (&args.table, &args.dataset) {
        (Some(table), _) => Dataset::table(table.clone()),
        (None, Some(arg)) => {
            let json = read_document(arg)?;
            Dataset::from_json(&json).context("Invalid dataset document")?
        }
        (None, None) => anyhow::bail!("Either --dataset or --table is required"),
    };
    let workflow_json = read_document(&args.workflow)?;
    let workflow = Workflow::from_json(&workflow_json).context("Invalid workflow document")?;

    log::debug!(
        "Compiling {} workflow nodes with {} dialect",
        workflow.nodes.len(),
        dialect
    );
    DslCompiler::new(dialect)
        .compile(&dataset, &workflow)
        .context("Compilation failed")
}
