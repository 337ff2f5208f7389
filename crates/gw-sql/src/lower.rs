//! Lowering of compiler-built select items into sqlparser nodes, used to
//! extend the projection of an absorbed sub-query without re-parsing text.

use crate::ast::{BinaryOperator, Expr, Function, ParsedQuery, SelectItem};
use crate::ident::is_bare_identifier;
use sqlparser::ast as sql;
use sqlparser::keywords::ALL_KEYWORDS;

impl ParsedQuery {
    /// Append `items` to the projection of a plain-SELECT body.
    ///
    /// Returns `false` and leaves the query untouched when the body is not a
    /// plain SELECT or an item has no sqlparser counterpart.
    pub fn append_projection(&mut self, items: &[SelectItem]) -> bool {
        let sql::SetExpr::Select(select) = self.0.body.as_mut() else {
            return false;
        };
        let Some(lowered) = items.iter().map(select_item).collect::<Option<Vec<_>>>() else {
            return false;
        };
        select.projection.extend(lowered);
        true
    }
}

fn select_item(item: &SelectItem) -> Option<sql::SelectItem> {
    match item {
        SelectItem::Placeholder => None,
        SelectItem::Unnamed(expr) => Some(sql::SelectItem::UnnamedExpr(expr_node(expr)?)),
        SelectItem::Aliased { expr, alias } => Some(sql::SelectItem::ExprWithAlias {
            expr: expr_node(expr)?,
            alias: ident(alias),
        }),
    }
}

/// Names sqlparser would read as a keyword or could not read bare are quoted.
fn ident(name: &str) -> sql::Ident {
    let upper = name.to_ascii_uppercase();
    if is_bare_identifier(name) && !ALL_KEYWORDS.contains(&upper.as_str()) {
        sql::Ident::new(name)
    } else {
        sql::Ident::with_quote('"', name)
    }
}

fn expr_node(expr: &Expr) -> Option<sql::Expr> {
    let node = match expr {
        Expr::Column(name) => sql::Expr::Identifier(ident(name)),
        Expr::Number(text) => sql::Expr::Value(sql::Value::Number(text.clone(), false).into()),
        Expr::String(value) => {
            sql::Expr::Value(sql::Value::SingleQuotedString(value.clone()).into())
        }
        Expr::Nested(inner) => sql::Expr::Nested(Box::new(expr_node(inner)?)),
        Expr::BinaryOp { left, op, right } => sql::Expr::BinaryOp {
            left: Box::new(expr_node(left)?),
            op: binary_operator(*op),
            right: Box::new(expr_node(right)?),
        },
        Expr::Function(func) => sql::Expr::Function(function(func)?),
        Expr::Wildcard
        | Expr::Raw(_)
        | Expr::Between { .. }
        | Expr::InList { .. }
        | Expr::PercentileCont { .. } => return None,
    };
    Some(node)
}

fn binary_operator(op: BinaryOperator) -> sql::BinaryOperator {
    match op {
        BinaryOperator::Plus => sql::BinaryOperator::Plus,
        BinaryOperator::Minus => sql::BinaryOperator::Minus,
        BinaryOperator::Multiply => sql::BinaryOperator::Multiply,
        BinaryOperator::Divide => sql::BinaryOperator::Divide,
        BinaryOperator::And => sql::BinaryOperator::And,
    }
}

fn function(func: &Function) -> Option<sql::Function> {
    let args = func
        .args
        .iter()
        .map(|arg| match arg {
            Expr::Wildcard => Some(sql::FunctionArg::Unnamed(sql::FunctionArgExpr::Wildcard)),
            other => Some(sql::FunctionArg::Unnamed(sql::FunctionArgExpr::Expr(
                expr_node(other)?,
            ))),
        })
        .collect::<Option<Vec<_>>>()?;

    let over = func.windowed.then(|| {
        sql::WindowType::WindowSpec(sql::WindowSpec {
            window_name: None,
            partition_by: Vec::new(),
            order_by: Vec::new(),
            window_frame: None,
        })
    });

    Some(sql::Function {
        name: sql::ObjectName::from(vec![sql::Ident::new(func.name.as_str())]),
        uses_odbc_syntax: false,
        parameters: sql::FunctionArguments::None,
        args: sql::FunctionArguments::List(sql::FunctionArgumentList {
            duplicate_treatment: None,
            args,
            clauses: Vec::new(),
        }),
        filter: None,
        null_treatment: None,
        over,
        within_group: Vec::new(),
    })
}

#[cfg(test)]
#[path = "lower_test.rs"]
mod tests;
