//! View compilation: view queries to select-lists and grouping keys.

use crate::alias::AliasTable;
use crate::error::{CompileError, CompileResult, OperatorKind};
use gw_core::{Aggregator, Measure, ViewQuery};
use gw_sql::{Expr, SelectItem};

/// Select-list and GROUP BY keys produced by one view query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledView {
    pub projection: Vec<SelectItem>,
    pub group_by: Vec<Expr>,
}

/// Compile one view query against the transform aliases seen so far.
pub fn compile_view(query: &ViewQuery, aliases: &AliasTable) -> CompileResult<CompiledView> {
    match query {
        ViewQuery::Raw { fields } => Ok(CompiledView {
            projection: fields.iter().map(|f| raw_field(f, aliases)).collect(),
            group_by: Vec::new(),
        }),
        ViewQuery::Aggregate { group_by, measures } => {
            let mut projection: Vec<SelectItem> = group_by
                .iter()
                .map(|key| group_key(key, aliases))
                .collect();
            for measure in measures {
                projection.push(compile_measure(measure, aliases)?);
            }
            Ok(CompiledView {
                projection,
                group_by: group_by.iter().map(Expr::column).collect(),
            })
        }
    }
}

fn raw_field(field: &str, aliases: &AliasTable) -> SelectItem {
    let name = field.trim_matches('"');
    if let Some(item) = aliases.item(field).or_else(|| aliases.item(name)) {
        return item.clone();
    }
    if name == "*" {
        return SelectItem::Unnamed(Expr::Wildcard);
    }
    SelectItem::Unnamed(Expr::column(name))
}

/// A grouping key selects the transform behind it, or else the key text
/// exactly as given.
fn group_key(key: &str, aliases: &AliasTable) -> SelectItem {
    aliases
        .item(key)
        .cloned()
        .unwrap_or_else(|| SelectItem::Unnamed(Expr::raw(key)))
}

fn compile_measure(measure: &Measure, aliases: &AliasTable) -> CompileResult<SelectItem> {
    let argument = measure_argument(measure, aliases)?;
    let expr = match &measure.aggregator {
        Aggregator::Median => Expr::PercentileCont {
            fraction: "0.5".to_string(),
            order_by: Box::new(argument),
        },
        other => {
            let name = aggregate_function(other).ok_or_else(|| {
                CompileError::UnsupportedOperator {
                    kind: OperatorKind::Aggregator,
                    name: other.as_str().to_string(),
                }
            })?;
            Expr::call(name, vec![argument])
        }
    };
    Ok(SelectItem::aliased(expr, measure.output_alias.clone()))
}

fn measure_argument(measure: &Measure, aliases: &AliasTable) -> CompileResult<Expr> {
    if let Some(expr) = aliases.expr(&measure.field) {
        return Ok(expr.clone());
    }
    if measure.field == "*" {
        return match measure.aggregator {
            Aggregator::Count => Ok(Expr::Wildcard),
            ref other => Err(CompileError::WildcardMeasure {
                aggregator: other.as_str().to_string(),
            }),
        };
    }
    Ok(Expr::column(measure.field.clone()))
}

/// SQL function name for an aggregator that maps to a plain call.
fn aggregate_function(aggregator: &Aggregator) -> Option<&'static str> {
    match aggregator {
        Aggregator::Sum => Some("sum"),
        Aggregator::Count => Some("count"),
        Aggregator::Max => Some("max"),
        Aggregator::Min => Some("min"),
        Aggregator::Mean => Some("avg"),
        Aggregator::Variance => Some("variance"),
        Aggregator::Stdev => Some("stddev"),
        Aggregator::Median | Aggregator::Other(_) => None,
    }
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
