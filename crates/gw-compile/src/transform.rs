//! Transform compilation: transform specs to aliased scalar expressions.
//!
//! Binning needs the minimum and maximum of its field over the whole
//! rowsource. Those are emitted as window pre-aggregates
//! (`max(f) OVER () AS max_<alias>`) that the assembler hoists into a
//! derived table, so the bin expression can reference them as plain
//! columns.

use crate::alias::AliasTable;
use crate::error::{CompileError, CompileResult, OperatorKind};
use gw_core::{TransformExpression, TransformOp, TransformSpec};
use gw_sql::{BinaryOperator, Expr, SelectItem};

/// Bucket count used when a bin transform gives none (or a non-positive one).
pub const DEFAULT_BIN_COUNT: i64 = 10;

/// Output of compiling one transform.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTransform {
    /// The aliased select item for the transform's output
    pub item: SelectItem,
    /// Whole-rowsource items the expression references as columns
    pub pre_aggregates: Vec<SelectItem>,
}

/// Compile one transform and register it in `aliases` under its output
/// alias, replacing any earlier entry.
pub fn compile_transform(
    spec: &TransformSpec,
    aliases: &mut AliasTable,
) -> CompileResult<CompiledTransform> {
    let expression = &spec.expression;
    let alias = expression.output_alias.as_str();
    if alias.is_empty() {
        return Err(CompileError::malformed(format!(
            "{} transform has an empty output alias",
            expression.op.as_str()
        )));
    }

    let (expr, pre_aggregates) = match &expression.op {
        TransformOp::Bin => {
            let field = operand(expression)?;
            let n = bin_count(expression);
            (bin(field, alias, n), min_max_window(field, alias))
        }
        TransformOp::BinCount => {
            let field = operand(expression)?;
            let n = bin_count(expression);
            (bin_count_expr(field, alias, n), min_max_window(field, alias))
        }
        TransformOp::Log2 => (log_ratio(operand(expression)?, 2), Vec::new()),
        TransformOp::Log10 => (
            Expr::call("log10", vec![Expr::column(operand(expression)?)]),
            Vec::new(),
        ),
        TransformOp::Log => {
            let field = operand(expression)?;
            let base = expression
                .num
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    CompileError::malformed(format!(
                        "log transform '{alias}' needs a positive base in num"
                    ))
                })?;
            (log_ratio(field, base), Vec::new())
        }
        TransformOp::One => (Expr::integer(1), Vec::new()),
        TransformOp::Sql => {
            let sql = expression
                .param("sql")
                .or_else(|| expression.param("value"))
                .or_else(|| expression.params.first().map(|p| p.value.as_str()))
                .ok_or_else(|| {
                    CompileError::malformed(format!("sql transform '{alias}' has no expression"))
                })?;
            (Expr::raw(sql), Vec::new())
        }
        TransformOp::DateTimeDrill => {
            let field = expression.param("field").ok_or_else(|| {
                CompileError::malformed(format!("dateTimeDrill '{alias}' has no field param"))
            })?;
            (date_time_drill(field, expression.param("value")), Vec::new())
        }
        TransformOp::Other(name) => {
            return Err(CompileError::UnsupportedOperator {
                kind: OperatorKind::Transform,
                name: name.clone(),
            });
        }
    };

    let item = SelectItem::aliased(expr, alias);
    if aliases.insert(alias, item.clone()).is_some() {
        log::debug!("Transform alias '{alias}' replaces an earlier definition");
    }
    Ok(CompiledTransform {
        item,
        pre_aggregates,
    })
}

fn operand(expression: &TransformExpression) -> CompileResult<&str> {
    expression.field().ok_or_else(|| {
        CompileError::malformed(format!(
            "{} transform '{}' has no field param",
            expression.op.as_str(),
            expression.output_alias
        ))
    })
}

fn bin_count(expression: &TransformExpression) -> i64 {
    expression
        .num
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_BIN_COUNT)
}

fn min_column(alias: &str) -> Expr {
    Expr::column(format!("min_{alias}"))
}

fn max_column(alias: &str) -> Expr {
    Expr::column(format!("max_{alias}"))
}

/// `max(field) OVER () AS max_<alias>`, `min(field) OVER () AS min_<alias>`
fn min_max_window(field: &str, alias: &str) -> Vec<SelectItem> {
    vec![
        SelectItem::aliased(
            Expr::window_call("max", vec![Expr::column(field)]),
            format!("max_{alias}"),
        ),
        SelectItem::aliased(
            Expr::window_call("min", vec![Expr::column(field)]),
            format!("min_{alias}"),
        ),
    ]
}

/// `((max - min) / step)`
fn bucket_width(alias: &str, step: Expr) -> Expr {
    let range = Expr::nested(Expr::binary(
        max_column(alias),
        BinaryOperator::Minus,
        min_column(alias),
    ));
    Expr::nested(Expr::binary(range, BinaryOperator::Divide, step))
}

/// `(field - min) / width`
fn offset_in_buckets(field: &str, alias: &str, width: Expr) -> Expr {
    let offset = Expr::nested(Expr::binary(
        Expr::column(field),
        BinaryOperator::Minus,
        min_column(alias),
    ));
    Expr::binary(offset, BinaryOperator::Divide, width)
}

/// `min + (least(floor((f - min) / ((max - min) / n.0)), n - 1) * ((max - min) / n.0))`
fn bin(field: &str, alias: &str, n: i64) -> Expr {
    let width = bucket_width(alias, Expr::float(n as f64, 1));
    let bucket = Expr::call(
        "least",
        vec![
            Expr::call("floor", vec![offset_in_buckets(field, alias, width.clone())]),
            Expr::integer(n - 1),
        ],
    );
    Expr::binary(
        min_column(alias),
        BinaryOperator::Plus,
        Expr::binary(bucket, BinaryOperator::Multiply, width),
    )
}

/// `least((f - min) / ((max - min) / n), n - 1) + 1`
fn bin_count_expr(field: &str, alias: &str, n: i64) -> Expr {
    let width = bucket_width(alias, Expr::integer(n));
    let bucket = Expr::call(
        "least",
        vec![offset_in_buckets(field, alias, width), Expr::integer(n - 1)],
    );
    Expr::binary(bucket, BinaryOperator::Plus, Expr::integer(1))
}

/// `log(field) / log(base)`
fn log_ratio(field: &str, base: i64) -> Expr {
    Expr::binary(
        Expr::call("log", vec![Expr::column(field)]),
        BinaryOperator::Divide,
        Expr::call("log", vec![Expr::integer(base)]),
    )
}

/// Truncation unit and output format for a drill level. Week and day share
/// a format; unknown levels drill to seconds.
fn drill_unit(level: Option<&str>) -> (&'static str, &'static str) {
    match level {
        Some("year") => ("year", "YYYY"),
        Some("month") => ("month", "YYYY-MM"),
        Some("week") => ("week", "YYYY-MM-DD"),
        Some("day") => ("day", "YYYY-MM-DD"),
        Some("hour") => ("hour", "YYYY-MM-DD HH24"),
        Some("minute") => ("minute", "YYYY-MM-DD HH24:MI"),
        _ => ("second", "YYYY-MM-DD HH24:MI:SS"),
    }
}

/// `to_char(date_trunc('<unit>', field), '<format>')`
fn date_time_drill(field: &str, level: Option<&str>) -> Expr {
    let (unit, format) = drill_unit(level);
    Expr::call(
        "to_char",
        vec![
            // Postgres takes the unit first: date_trunc(text, timestamp)
            Expr::call("date_trunc", vec![Expr::string(unit), Expr::column(field)]),
            Expr::string(format),
        ],
    )
}

#[cfg(test)]
#[path = "transform_test.rs"]
mod tests;
