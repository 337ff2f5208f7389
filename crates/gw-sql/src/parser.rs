//! SQL parser wrapper

use crate::ast::ParsedQuery;
use crate::dialect::{DuckDbDialect, GenericDialect, PostgresDialect, SqlDialect};
use crate::error::{SqlError, SqlResult};
use sqlparser::ast::Statement;

/// SQL parser that wraps sqlparser-rs with dialect support
pub struct SqlParser {
    dialect: Box<dyn SqlDialect>,
}

impl SqlParser {
    /// Create a new parser with PostgreSQL dialect
    pub fn postgres() -> Self {
        Self {
            dialect: Box::new(PostgresDialect::new()),
        }
    }

    /// Create a new parser with DuckDB dialect
    pub fn duckdb() -> Self {
        Self {
            dialect: Box::new(DuckDbDialect::new()),
        }
    }

    /// Create a new parser with the generic dialect
    pub fn generic() -> Self {
        Self {
            dialect: Box::new(GenericDialect::new()),
        }
    }

    /// Create a parser from dialect name
    pub fn from_dialect_name(name: &str) -> SqlResult<Self> {
        match name.to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::postgres()),
            "duckdb" => Ok(Self::duckdb()),
            "generic" => Ok(Self::generic()),
            _ => Err(SqlError::UnknownDialect(name.to_string())),
        }
    }

    /// Parse SQL into AST statements
    pub fn parse(&self, sql: &str) -> SqlResult<Vec<Statement>> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::EmptySql);
        }

        self.dialect.parse(sql)
    }

    /// Parse SQL that must hold exactly one query statement.
    pub fn parse_query(&self, sql: &str) -> SqlResult<ParsedQuery> {
        let mut stmts = self.parse(sql)?;
        if stmts.len() > 1 {
            return Err(SqlError::MultipleStatements(stmts.len()));
        }
        match stmts.pop() {
            Some(Statement::Query(query)) => Ok(ParsedQuery(query)),
            Some(other) => Err(SqlError::UnsupportedStatement(statement_kind(&other))),
            None => Err(SqlError::EmptySql),
        }
    }

    /// Get the dialect name
    pub fn dialect_name(&self) -> &'static str {
        self.dialect.name()
    }
}

impl Default for SqlParser {
    fn default() -> Self {
        Self::postgres()
    }
}

/// Short human-readable kind of a non-query statement.
fn statement_kind(stmt: &Statement) -> String {
    let text = stmt.to_string();
    let words: Vec<&str> = text.split_whitespace().take(2).collect();
    match words.as_slice() {
        [] => "unknown".to_string(),
        [first] => first.to_uppercase(),
        [first, second, ..] => {
            let first = first.to_uppercase();
            if matches!(first.as_str(), "CREATE" | "DROP" | "ALTER") {
                format!("{} {}", first, second.to_uppercase())
            } else {
                first
            }
        }
    }
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
