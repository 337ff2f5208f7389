//! Dataset resolution: the FROM target of the compiled statement.

use crate::error::{CompileError, CompileResult};
use gw_core::{Dataset, DatasetKind};
use gw_sql::{SqlParser, TableFactor};

/// Alias given to every derived table the compiler produces.
pub const SUB_QUERY_ALIAS: &str = "kanaries_sub_query";

/// Resolve a dataset to a table reference or a parsed, aliased sub-query.
pub fn resolve_dataset(dataset: &Dataset, parser: &SqlParser) -> CompileResult<TableFactor> {
    match dataset.kind {
        DatasetKind::Table => {
            if dataset.source.trim().is_empty() {
                return Err(CompileError::malformed("table dataset has an empty source"));
            }
            Ok(TableFactor::table(dataset.source.clone()))
        }
        DatasetKind::SubQuery => {
            let query = parser
                .parse_query(&dataset.source)
                .map_err(CompileError::UnparsableSubQuery)?;
            log::debug!(
                "Resolved sub-query dataset with {} dialect",
                parser.dialect_name()
            );
            Ok(TableFactor::Parsed {
                query,
                alias: SUB_QUERY_ALIAS.to_string(),
            })
        }
    }
}
