//! Sort compilation.

use gw_core::{SortDirection, SortNode};
use gw_sql::{Expr, OrderByExpr, OrderDirection};

/// ORDER BY terms for a sort node, or `None` when the node carries no
/// direction and the current ordering should be kept.
pub fn compile_sort(node: &SortNode) -> Option<Vec<OrderByExpr>> {
    let direction = match node.direction {
        SortDirection::Ascending => OrderDirection::Asc,
        SortDirection::Descending => OrderDirection::Desc,
        SortDirection::None => return None,
    };
    Some(
        node.by
            .iter()
            .map(|key| OrderByExpr {
                expr: Expr::column(key.clone()),
                direction: Some(direction),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> SortNode {
        serde_json::from_value(value).unwrap()
    }

    fn rendered(terms: &[OrderByExpr]) -> Vec<String> {
        terms.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_ascending() {
        let terms = compile_sort(&node(json!({"sort": "ascending", "by": ["col_1", "Total"]})))
            .unwrap();
        assert_eq!(rendered(&terms), vec!["col_1 ASC", "\"Total\" ASC"]);
    }

    #[test]
    fn test_descending() {
        let terms = compile_sort(&node(json!({"sort": "descending", "by": ["n"]}))).unwrap();
        assert_eq!(rendered(&terms), vec!["n DESC"]);
    }

    #[test]
    fn test_no_direction_keeps_ordering() {
        assert_eq!(compile_sort(&node(json!({"by": ["n"]}))), None);
        assert_eq!(compile_sort(&node(json!({"sort": "none", "by": ["n"]}))), None);
    }

    #[test]
    fn test_empty_by_clears_ordering() {
        let terms = compile_sort(&node(json!({"sort": "ascending", "by": []}))).unwrap();
        assert!(terms.is_empty());
    }
}
