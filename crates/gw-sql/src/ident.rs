//! Identifier and string literal encoding.
//!
//! An identifier is printed bare only when it is made of the safe character
//! set (lowercase ASCII letters, `_`, non-ASCII characters, and after the
//! first position digits and `$`). Restricted positions additionally quote
//! reserved keywords; alias positions do not.

use std::fmt::{self, Write};

/// Keywords that cannot appear bare in a restricted name position.
const RESERVED_KEYWORDS: &[&str] = &[
    "all",
    "analyse",
    "analyze",
    "and",
    "any",
    "array",
    "as",
    "asc",
    "asymmetric",
    "both",
    "case",
    "cast",
    "check",
    "collate",
    "column",
    "concurrently",
    "constraint",
    "create",
    "current_catalog",
    "current_date",
    "current_role",
    "current_schema",
    "current_time",
    "current_timestamp",
    "current_user",
    "default",
    "deferrable",
    "desc",
    "distinct",
    "do",
    "else",
    "end",
    "except",
    "false",
    "fetch",
    "for",
    "foreign",
    "from",
    "grant",
    "group",
    "having",
    "in",
    "index",
    "initially",
    "intersect",
    "into",
    "lateral",
    "leading",
    "limit",
    "localtime",
    "localtimestamp",
    "not",
    "nothing",
    "null",
    "offset",
    "on",
    "only",
    "or",
    "order",
    "placing",
    "primary",
    "references",
    "returning",
    "select",
    "session_user",
    "some",
    "symmetric",
    "table",
    "then",
    "to",
    "trailing",
    "true",
    "union",
    "unique",
    "user",
    "using",
    "variadic",
    "when",
    "where",
    "window",
    "with",
];

fn is_ident_start(c: char) -> bool {
    c.is_ascii_lowercase() || c == '_' || !c.is_ascii()
}

fn is_ident_middle(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '$'
}

/// Whether `name` can be printed without quotes, ignoring keywords.
pub fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_ident_start(first) => chars.all(is_ident_middle),
        _ => false,
    }
}

pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(&name)
}

fn write_quoted(f: &mut impl Write, name: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in name.chars() {
        if c == '"' {
            f.write_str("\"\"")?;
        } else {
            f.write_char(c)?;
        }
    }
    f.write_char('"')
}

/// Write a name used as a column, table, or grouping reference.
pub fn write_restricted(f: &mut impl Write, name: &str) -> fmt::Result {
    if is_bare_identifier(name) && !is_reserved_keyword(name) {
        f.write_str(name)
    } else {
        write_quoted(f, name)
    }
}

/// Write a name used as a select-item alias.
pub fn write_unrestricted(f: &mut impl Write, name: &str) -> fmt::Result {
    if is_bare_identifier(name) {
        f.write_str(name)
    } else {
        write_quoted(f, name)
    }
}

/// Write a string literal. Text containing a quote, backslash, or control
/// character is written as an escape string (`e'...'`).
pub fn write_string_literal(f: &mut impl Write, value: &str) -> fmt::Result {
    let needs_escape = value
        .chars()
        .any(|c| c == '\'' || c == '\\' || c.is_control());
    if !needs_escape {
        f.write_char('\'')?;
        f.write_str(value)?;
        return f.write_char('\'');
    }

    f.write_str("e'")?;
    for c in value.chars() {
        match c {
            '\'' => f.write_str("\\'")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            '\u{8}' => f.write_str("\\b")?,
            '\u{c}' => f.write_str("\\f")?,
            c if (c as u32) < 0x100 && c.is_control() => write!(f, "\\x{:02x}", c as u32)?,
            c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('\'')
}

#[cfg(test)]
#[path = "ident_test.rs"]
mod tests;
