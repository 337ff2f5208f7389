//! Query assembly: one pass over the workflow nodes into a single SELECT.

use crate::alias::AliasTable;
use crate::dataset::{resolve_dataset, SUB_QUERY_ALIAS};
use crate::error::CompileResult;
use crate::filter::{compile_filter, conjunction};
use crate::sort::compile_sort;
use crate::transform::compile_transform;
use crate::view::compile_view;
use gw_core::{Dataset, Dialect, Workflow, WorkflowNode};
use gw_sql::{Expr, Limit, OrderByExpr, Select, SelectItem, SqlParser, TableFactor};

/// Owned compiler handle.
///
/// Holds only the sub-query parser. Every compilation builds its own alias
/// table and pre-aggregate pool, so one handle can be shared freely across
/// threads.
pub struct DslCompiler {
    parser: SqlParser,
}

impl DslCompiler {
    /// Create a compiler that parses sub-query datasets with `dialect`.
    pub fn new(dialect: Dialect) -> Self {
        let parser = match dialect {
            Dialect::Postgres => SqlParser::postgres(),
            Dialect::DuckDb => SqlParser::duckdb(),
            Dialect::Generic => SqlParser::generic(),
        };
        Self::with_parser(parser)
    }

    pub fn with_parser(parser: SqlParser) -> Self {
        Self { parser }
    }

    /// Name of the sub-query dialect
    pub fn dialect_name(&self) -> &'static str {
        self.parser.dialect_name()
    }

    /// Compile a workflow into the statement tree without rendering it.
    pub fn build(&self, dataset: &Dataset, workflow: &Workflow) -> CompileResult<Select> {
        let from = resolve_dataset(dataset, &self.parser)?;
        let mut pipeline = Pipeline::default();
        for node in &workflow.nodes {
            pipeline.apply(node)?;
        }
        log::debug!(
            "Compiled {} workflow nodes: {} select items, {} pre-aggregates",
            workflow.nodes.len(),
            pipeline.projection.len(),
            pipeline.pre_aggregates.len()
        );
        Ok(pipeline.finish(from, workflow))
    }

    /// Compile a workflow to SQL text.
    pub fn compile(&self, dataset: &Dataset, workflow: &Workflow) -> CompileResult<String> {
        self.build(dataset, workflow).map(|select| select.to_sql())
    }

    /// Compile from the JSON wire documents.
    pub fn compile_json(&self, dataset_json: &str, workflow_json: &str) -> CompileResult<String> {
        let dataset = Dataset::from_json(dataset_json)?;
        let workflow = Workflow::from_json(workflow_json)?;
        self.compile(&dataset, &workflow)
    }
}

impl Default for DslCompiler {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

/// State threaded through one compilation.
#[derive(Debug, Default)]
struct Pipeline {
    aliases: AliasTable,
    predicates: Vec<Expr>,
    projection: Vec<SelectItem>,
    group_by: Vec<Expr>,
    order_by: Vec<OrderByExpr>,
    pre_aggregates: Vec<SelectItem>,
}

impl Pipeline {
    fn apply(&mut self, node: &WorkflowNode) -> CompileResult<()> {
        match node {
            WorkflowNode::Filter(filter) => {
                for spec in &filter.filters {
                    self.predicates.push(compile_filter(spec)?);
                }
            }
            WorkflowNode::Transform(transform) => {
                for spec in &transform.items {
                    let compiled = compile_transform(spec, &mut self.aliases)?;
                    self.projection.push(compiled.item);
                    self.pre_aggregates.extend(compiled.pre_aggregates);
                }
            }
            WorkflowNode::View(view) => {
                if view.queries.len() > 1 {
                    log::debug!(
                        "View has {} queries; only the last one is kept",
                        view.queries.len()
                    );
                }
                for query in &view.queries {
                    let compiled = compile_view(query, &self.aliases)?;
                    self.projection = compiled.projection;
                    self.group_by = compiled.group_by;
                }
            }
            WorkflowNode::Sort(sort) => {
                if let Some(order_by) = compile_sort(sort) {
                    self.order_by = order_by;
                }
            }
        }
        Ok(())
    }

    fn finish(self, from: TableFactor, workflow: &Workflow) -> Select {
        let from = lift_pre_aggregates(from, self.pre_aggregates);

        let mut projection = self.projection;
        if projection.is_empty() {
            projection.push(SelectItem::Placeholder);
        }

        let mut select = Select::new(projection, from);
        select.selection = conjunction(self.predicates);
        select.group_by = self.group_by;
        select.order_by = self.order_by;
        if workflow.limit != 0 {
            select.limit = Some(Limit {
                count: workflow.limit,
                offset: workflow.offset,
            });
        }
        select
    }
}

/// Make the pre-aggregate pool visible as columns of the FROM target.
fn lift_pre_aggregates(from: TableFactor, pool: Vec<SelectItem>) -> TableFactor {
    if pool.is_empty() {
        return from;
    }

    match from {
        TableFactor::Parsed { mut query, alias } => {
            if query.append_projection(&pool) {
                log::debug!("Appended {} pre-aggregates to the sub-query", pool.len());
                return TableFactor::Parsed { query, alias };
            }
            log::debug!("Sub-query projection cannot take the pre-aggregates; wrapping it");
            wrap(TableFactor::Parsed { query, alias }, pool)
        }
        other => {
            log::debug!("Wrapping FROM target for {} pre-aggregates", pool.len());
            wrap(other, pool)
        }
    }
}

/// `(SELECT *, <pool> FROM <from>) AS kanaries_sub_query`
fn wrap(from: TableFactor, pool: Vec<SelectItem>) -> TableFactor {
    let mut projection = Vec::with_capacity(pool.len() + 1);
    projection.push(SelectItem::Unnamed(Expr::Wildcard));
    projection.extend(pool);
    TableFactor::Derived {
        subquery: Box::new(Select::new(projection, from)),
        alias: SUB_QUERY_ALIAS.to_string(),
    }
}

#[cfg(test)]
#[path = "compiler_test.rs"]
mod tests;
