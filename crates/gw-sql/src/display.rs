//! Canonical printer for the relational AST.

use crate::ast::{
    Expr, Function, Limit, OrderByExpr, OrderDirection, ParsedQuery, Select, SelectItem,
    TableFactor,
};
use crate::ident::{write_restricted, write_string_literal, write_unrestricted};
use std::fmt;

/// Write an operand, parenthesized when it is itself an operator expression.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    if expr.is_operator() {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Column(name) => write_restricted(f, name),
            Expr::Wildcard => f.write_str("*"),
            Expr::Number(text) | Expr::Raw(text) => f.write_str(text),
            Expr::String(value) => write_string_literal(f, value),
            Expr::Nested(inner) => write!(f, "({inner})"),
            Expr::BinaryOp { left, op, right } => {
                write_operand(f, left)?;
                write!(f, " {} ", op.as_str())?;
                write_operand(f, right)
            }
            Expr::Between { expr, low, high } => {
                write_operand(f, expr)?;
                f.write_str(" BETWEEN ")?;
                write_operand(f, low)?;
                f.write_str(" AND ")?;
                write_operand(f, high)
            }
            Expr::InList { expr, list } => {
                write_operand(f, expr)?;
                f.write_str(" IN (")?;
                write_separated(f, list, ", ")?;
                f.write_str(")")
            }
            Expr::Function(func) => write!(f, "{func}"),
            Expr::PercentileCont { fraction, order_by } => {
                write!(
                    f,
                    "PERCENTILE_CONT({fraction}) WITHIN GROUP (ORDER BY {order_by})"
                )
            }
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        write_separated(f, &self.args, ", ")?;
        f.write_str(")")?;
        if self.windowed {
            f.write_str(" OVER ()")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectItem::Placeholder => Ok(()),
            SelectItem::Unnamed(expr) => write!(f, "{expr}"),
            SelectItem::Aliased { expr, alias } => {
                write!(f, "{expr} AS ")?;
                write_unrestricted(f, alias)
            }
        }
    }
}

impl fmt::Display for TableFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFactor::Table { name } => write_restricted(f, name),
            TableFactor::Derived { subquery, alias } => {
                write!(f, "({subquery}) AS ")?;
                write_restricted(f, alias)
            }
            TableFactor::Parsed { query, alias } => {
                write!(f, "({query}) AS ")?;
                write_restricted(f, alias)
            }
        }
    }
}

impl fmt::Display for ParsedQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OrderByExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        match self.direction {
            Some(OrderDirection::Asc) => f.write_str(" ASC"),
            Some(OrderDirection::Desc) => f.write_str(" DESC"),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LIMIT {} OFFSET {}", self.count, self.offset)
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        write_separated(f, &self.projection, ", ")?;
        write!(f, " FROM {}", self.from)?;
        if let Some(selection) = &self.selection {
            write!(f, " WHERE {selection}")?;
        }
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            write_separated(f, &self.group_by, ", ")?;
        }
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            write_separated(f, &self.order_by, ", ")?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " {limit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "display_test.rs"]
mod tests;
