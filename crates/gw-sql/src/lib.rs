//! gw-sql - SQL layer for gw
//!
//! This crate provides the internal relational AST the compiler assembles,
//! a canonical printer that renders it to fixture-exact text, identifier and
//! literal encoding, and a sqlparser-rs wrapper used to absorb pre-existing
//! sub-query datasets.

pub mod ast;
pub mod dialect;
mod display;
pub mod error;
pub mod ident;
mod lower;
pub mod parser;

pub use ast::{
    BinaryOperator, Expr, Function, Limit, OrderByExpr, OrderDirection, ParsedQuery, Select,
    SelectItem, TableFactor,
};
pub use dialect::{DuckDbDialect, GenericDialect, PostgresDialect, SqlDialect};
pub use error::{SqlError, SqlResult};
pub use parser::SqlParser;
