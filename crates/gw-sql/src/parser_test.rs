use super::*;

#[test]
fn test_parse_select() {
    let parser = SqlParser::postgres();
    let stmts = parser
        .parse("SELECT id, name FROM users WHERE id = 1")
        .unwrap();
    assert_eq!(stmts.len(), 1);
}

#[test]
fn test_parse_empty() {
    let parser = SqlParser::postgres();
    assert!(matches!(parser.parse(""), Err(SqlError::EmptySql)));
    assert!(matches!(parser.parse_query("   "), Err(SqlError::EmptySql)));
}

#[test]
fn test_parse_query_single() {
    let parser = SqlParser::postgres();
    let query = parser.parse_query("SELECT a, b FROM t WHERE a > 1").unwrap();
    assert_eq!(query.to_string(), "SELECT a, b FROM t WHERE a > 1");
}

#[test]
fn test_parse_query_rejects_multiple_statements() {
    let parser = SqlParser::postgres();
    let result = parser.parse_query("SELECT 1; SELECT 2");
    assert!(matches!(result, Err(SqlError::MultipleStatements(2))));
}

#[test]
fn test_parse_query_rejects_non_query() {
    let parser = SqlParser::postgres();
    let result = parser.parse_query("DELETE FROM users");
    assert!(matches!(result, Err(SqlError::UnsupportedStatement(_))));
}

#[test]
fn test_parse_query_syntax_error() {
    let parser = SqlParser::postgres();
    let result = parser.parse_query("SELEC a FROM t");
    assert!(matches!(result, Err(SqlError::ParseError { .. })));
}

#[test]
fn test_parse_query_set_operation() {
    let parser = SqlParser::postgres();
    let query = parser
        .parse_query("SELECT a FROM t UNION ALL SELECT a FROM u")
        .unwrap();
    assert_eq!(query.to_string(), "SELECT a FROM t UNION ALL SELECT a FROM u");
}

#[test]
fn test_from_dialect_name() {
    let parser = SqlParser::from_dialect_name("postgres").unwrap();
    assert_eq!(parser.dialect_name(), "postgres");

    let parser = SqlParser::from_dialect_name("DuckDB").unwrap();
    assert_eq!(parser.dialect_name(), "duckdb");

    let parser = SqlParser::from_dialect_name("generic").unwrap();
    assert_eq!(parser.dialect_name(), "generic");

    let result = SqlParser::from_dialect_name("oracle");
    assert!(matches!(result, Err(SqlError::UnknownDialect(_))));
}
