//! gw-compile - Workflow-to-SQL compiler
//!
//! This crate turns a Graphic Walker workflow (filters, transforms, views
//! and sorts over a dataset) into the text of a single SELECT statement.
//! Compilation is a pure function of its inputs: nothing is executed and
//! no state outlives a call.
//!
//! ```
//! use gw_compile::{compile, Dataset, Workflow};
//!
//! let workflow = Workflow::from_json(
//!     r#"{"workflow": [{"type": "view", "query": [{"op": "raw", "fields": ["col_2"]}]}]}"#,
//! )
//! .unwrap();
//! let sql = compile(&Dataset::table("table1"), &workflow).unwrap();
//! assert_eq!(sql, "SELECT col_2 FROM table1");
//! ```

pub mod alias;
pub mod compiler;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod sort;
pub mod transform;
pub mod view;

pub use alias::AliasTable;
pub use compiler::DslCompiler;
pub use dataset::SUB_QUERY_ALIAS;
pub use error::{CompileError, CompileResult, OperatorKind};
pub use gw_core::{Dataset, Dialect, Workflow};

/// Compile with the default sub-query dialect.
pub fn compile(dataset: &Dataset, workflow: &Workflow) -> CompileResult<String> {
    DslCompiler::default().compile(dataset, workflow)
}
