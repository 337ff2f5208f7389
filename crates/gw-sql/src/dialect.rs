//! Dialects used to parse user-supplied sub-queries

use sqlparser::ast::Statement;
use sqlparser::dialect::{self, Dialect};
use sqlparser::parser::Parser;

use crate::error::{SqlError, SqlResult};

/// A named sqlparser dialect that sub-query text is parsed with
pub trait SqlDialect: Send + Sync {
    fn parser_dialect(&self) -> &dyn Dialect;

    /// Parse `sql` into statements, keeping the reported position on failure
    fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        Parser::parse_sql(self.parser_dialect(), sql).map_err(|err| {
            let message = err.to_string();
            let (line, column) = error_location(&message).unwrap_or((0, 0));
            SqlError::ParseError {
                message,
                line,
                column,
            }
        })
    }

    /// Name matched by `SqlParser::from_dialect_name`
    fn name(&self) -> &'static str;
}

/// Reads the trailing "Line: N, Column: M" sqlparser appends to its messages.
fn error_location(message: &str) -> Option<(usize, usize)> {
    let (_, rest) = message.rsplit_once("Line: ")?;
    let (line, rest) = rest.split_once(',')?;
    let rest = rest.trim_start().strip_prefix("Column: ")?;
    let digits = rest
        .find(|c: char| !c.is_ascii_digit())
        .map_or(rest, |end| &rest[..end]);
    Some((line.trim().parse().ok()?, digits.parse().ok()?))
}

macro_rules! sql_dialect {
    ($(#[$doc:meta])* $name:ident, $inner:ty, $label:literal) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name {
            inner: $inner,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    inner: <$inner>::default(),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl SqlDialect for $name {
            fn parser_dialect(&self) -> &dyn Dialect {
                &self.inner
            }

            fn name(&self) -> &'static str {
                $label
            }
        }
    };
}

sql_dialect!(
    /// PostgreSQL, the default for compiled workflows
    PostgresDialect,
    dialect::PostgreSqlDialect,
    "postgres"
);
sql_dialect!(DuckDbDialect, dialect::DuckDbDialect, "duckdb");
sql_dialect!(
    /// Accepts the widest syntax; used when no dialect is configured
    GenericDialect,
    dialect::GenericDialect,
    "generic"
);

#[cfg(test)]
#[path = "dialect_test.rs"]
mod tests;
