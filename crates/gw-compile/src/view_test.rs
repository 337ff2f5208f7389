use super::*;
use serde_json::json;

fn query(value: serde_json::Value) -> ViewQuery {
    serde_json::from_value(value).unwrap()
}

fn projection_sql(view: &CompiledView) -> Vec<String> {
    view.projection.iter().map(ToString::to_string).collect()
}

fn aggregate(group_by: &[&str], field: &str, agg: &str, alias: &str) -> ViewQuery {
    query(json!({
        "op": "aggregate",
        "groupBy": group_by,
        "measures": [{"field": field, "agg": agg, "asFieldKey": alias}]
    }))
}

#[test]
fn test_raw_fields() {
    let view = compile_view(
        &query(json!({"op": "raw", "fields": ["col_2", "\"Quoted\"", "*"]})),
        &AliasTable::new(),
    )
    .unwrap();
    assert_eq!(projection_sql(&view), vec!["col_2", "\"Quoted\"", "*"]);
    assert!(view.group_by.is_empty());
}

#[test]
fn test_raw_field_uses_transform_alias() {
    let mut aliases = AliasTable::new();
    aliases.insert(
        "gw_f23i",
        SelectItem::aliased(Expr::call("log10", vec![Expr::column("col_1")]), "gw_f23i"),
    );
    let view = compile_view(
        &query(json!({"op": "raw", "fields": ["gw_f23i", "col_1"]})),
        &aliases,
    )
    .unwrap();
    assert_eq!(
        projection_sql(&view),
        vec!["log10(col_1) AS gw_f23i", "col_1"]
    );
}

#[test]
fn test_aggregator_mapping() {
    let cases = [
        ("sum", "sum(col_3) AS col_3_x"),
        ("count", "count(col_3) AS col_3_x"),
        ("max", "max(col_3) AS col_3_x"),
        ("min", "min(col_3) AS col_3_x"),
        ("mean", "avg(col_3) AS col_3_x"),
        ("variance", "variance(col_3) AS col_3_x"),
        ("stdev", "stddev(col_3) AS col_3_x"),
        (
            "median",
            "PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY col_3) AS col_3_x",
        ),
    ];
    for (agg, expected) in cases {
        let view = compile_view(
            &aggregate(&["col_0"], "col_3", agg, "col_3_x"),
            &AliasTable::new(),
        )
        .unwrap();
        assert_eq!(projection_sql(&view), vec!["col_0", expected], "agg {agg}");
        assert_eq!(view.group_by, vec![Expr::column("col_0")]);
    }
}

#[test]
fn test_measure_over_transform_alias() {
    let mut aliases = AliasTable::new();
    aliases.insert(
        "gw_count_fid",
        SelectItem::aliased(Expr::integer(1), "gw_count_fid"),
    );
    let view = compile_view(
        &aggregate(&["col_14", "col_10"], "gw_count_fid", "sum", "gw_count_fid_sum"),
        &aliases,
    )
    .unwrap();
    assert_eq!(
        projection_sql(&view),
        vec!["col_14", "col_10", "sum(1) AS gw_count_fid_sum"]
    );
}

#[test]
fn test_median_over_transform_alias() {
    let mut aliases = AliasTable::new();
    aliases.insert(
        "lg",
        SelectItem::aliased(Expr::call("log10", vec![Expr::column("v")]), "lg"),
    );
    let view = compile_view(&aggregate(&[], "lg", "median", "lg_median"), &aliases).unwrap();
    assert_eq!(
        projection_sql(&view),
        vec!["PERCENTILE_CONT(0.5) WITHIN GROUP (ORDER BY log10(v)) AS lg_median"]
    );
}

#[test]
fn test_group_key_is_verbatim_in_projection() {
    let view = compile_view(
        &query(json!({"op": "aggregate", "groupBy": ["c2Vhc29uXzI="], "measures": []})),
        &AliasTable::new(),
    )
    .unwrap();
    assert_eq!(projection_sql(&view), vec!["c2Vhc29uXzI="]);
    assert_eq!(view.group_by[0].to_string(), "\"c2Vhc29uXzI=\"");
}

#[test]
fn test_count_star() {
    let view = compile_view(&aggregate(&[], "*", "count", "count"), &AliasTable::new()).unwrap();
    assert_eq!(projection_sql(&view), vec!["count(*) AS count"]);
    assert!(view.group_by.is_empty());
}

#[test]
fn test_star_with_other_aggregator() {
    let result = compile_view(&aggregate(&[], "*", "sum", "s"), &AliasTable::new());
    match result {
        Err(CompileError::WildcardMeasure { aggregator }) => assert_eq!(aggregator, "sum"),
        other => panic!("expected WildcardMeasure, got {other:?}"),
    }
}

#[test]
fn test_unknown_aggregator() {
    let result = compile_view(&aggregate(&[], "v", "mode", "m"), &AliasTable::new());
    assert!(matches!(
        result,
        Err(CompileError::UnsupportedOperator {
            kind: OperatorKind::Aggregator,
            ..
        })
    ));
}
