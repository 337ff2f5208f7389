use super::*;

fn restricted(name: &str) -> String {
    let mut out = String::new();
    write_restricted(&mut out, name).unwrap();
    out
}

fn unrestricted(name: &str) -> String {
    let mut out = String::new();
    write_unrestricted(&mut out, name).unwrap();
    out
}

fn string_literal(value: &str) -> String {
    let mut out = String::new();
    write_string_literal(&mut out, value).unwrap();
    out
}

#[test]
fn test_lowercase_identifiers_are_bare() {
    assert_eq!(restricted("col_1"), "col_1");
    assert_eq!(restricted("gw_62jy"), "gw_62jy");
    assert_eq!(restricted("_private"), "_private");
    assert_eq!(restricted("a$b"), "a$b");
}

#[test]
fn test_uppercase_identifiers_are_quoted() {
    assert_eq!(restricted("gw_ZM8H"), "\"gw_ZM8H\"");
    assert_eq!(unrestricted("gw_MMjF_sum"), "\"gw_MMjF_sum\"");
}

#[test]
fn test_unsafe_characters_are_quoted() {
    assert_eq!(restricted("c2Vhc29uXzI="), "\"c2Vhc29uXzI=\"");
    assert_eq!(restricted("1col"), "\"1col\"");
    assert_eq!(restricted("$a"), "\"$a\"");
    assert_eq!(restricted("my col"), "\"my col\"");
    assert_eq!(restricted(""), "\"\"");
}

#[test]
fn test_embedded_quote_is_doubled() {
    assert_eq!(restricted("a\"b"), "\"a\"\"b\"");
}

#[test]
fn test_reserved_keywords_quoted_only_when_restricted() {
    assert_eq!(restricted("order"), "\"order\"");
    assert_eq!(unrestricted("order"), "order");
    assert_eq!(restricted("count"), "count");
    assert_eq!(unrestricted("count"), "count");
}

#[test]
fn test_non_ascii_is_bare() {
    assert_eq!(restricted("销售额"), "销售额");
}

#[test]
fn test_plain_string_literal() {
    assert_eq!(string_literal("charge"), "'charge'");
    assert_eq!(string_literal("0.1.6.2-alpha.0"), "'0.1.6.2-alpha.0'");
    assert_eq!(string_literal(""), "''");
}

#[test]
fn test_escaped_string_literal() {
    assert_eq!(string_literal("it's"), "e'it\\'s'");
    assert_eq!(string_literal("a\\b"), "e'a\\\\b'");
    assert_eq!(string_literal("line\nbreak"), "e'line\\nbreak'");
    assert_eq!(string_literal("\u{1}"), "e'\\x01'");
}
