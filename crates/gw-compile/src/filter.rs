//! Filter compilation: filter specs to boolean predicates.

use crate::error::{CompileError, CompileResult};
use gw_core::{FilterRuleKind, FilterSpec, Literal};
use gw_sql::Expr;

/// Fractional digits used for float filter literals.
const FLOAT_PRECISION: usize = 4;

fn literal_expr(literal: &Literal) -> Expr {
    match literal {
        Literal::Integer(v) => Expr::integer(*v),
        Literal::Float(v) => Expr::float(*v, FLOAT_PRECISION),
        Literal::String(s) => Expr::string(s.clone()),
    }
}

/// Compile one filter spec into a predicate.
pub fn compile_filter(spec: &FilterSpec) -> CompileResult<Expr> {
    let column = spec
        .column()
        .ok_or_else(|| CompileError::malformed("filter has neither fid nor key"))?;
    let literals = spec.rule.literals()?;

    match spec.rule.kind {
        FilterRuleKind::Range | FilterRuleKind::TemporalRange => {
            let [low, high] = literals.as_slice() else {
                return Err(CompileError::malformed(format!(
                    "range filter on '{column}' needs exactly two values"
                )));
            };
            Ok(Expr::between(
                Expr::column(column),
                literal_expr(low),
                literal_expr(high),
            ))
        }
        FilterRuleKind::OneOf => {
            let mut list: Vec<Expr> = literals.iter().map(literal_expr).collect();
            // the list literal downstream needs at least two members
            if list.len() == 1 {
                log::debug!("Duplicating singleton IN-list on '{column}'");
                let only = list[0].clone();
                list.push(only);
            }
            Ok(Expr::in_list(Expr::column(column), list))
        }
    }
}

/// Fold predicates into one right-associated conjunction.
///
/// Returns `None` when there is nothing to filter on.
pub fn conjunction(mut predicates: Vec<Expr>) -> Option<Expr> {
    let mut acc = predicates.pop()?;
    while let Some(prev) = predicates.pop() {
        acc = Expr::and(prev, acc);
    }
    Some(acc)
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
