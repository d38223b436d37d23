use ordmic::table::{Table, Value};
use serde_json::json;

fn rows_from(v: serde_json::Value) -> Vec<serde_json::Map<String, serde_json::Value>> {
    v.as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().unwrap().clone())
        .collect()
}

#[test]
fn from_json_rows_preserves_order() {
    let rows = rows_from(json!([
        {"strain": "WT", "MIC": 1.5, "lower_ci": 0.5},
        {"strain": "mut", "MIC": 3.0, "lower_ci": 1.0}
    ]));
    let table = Table::from_json_rows(&rows);
    assert_eq!(table.columns(), &["strain", "MIC", "lower_ci"]);
    assert_eq!(table.n_rows(), 2);
    assert_eq!(table.get(1, "MIC"), Some(&Value::Num(3.0)));
}

#[test]
fn missing_fields_become_missing_values() {
    let rows = rows_from(json!([
        {"a": 1.0, "b": "x"},
        {"a": 2.0}
    ]));
    let table = Table::from_json_rows(&rows);
    assert_eq!(table.get(1, "b"), Some(&Value::Missing));
}

#[test]
fn null_and_na_are_missing() {
    let rows = rows_from(json!([{"a": null, "b": "NA"}]));
    let table = Table::from_json_rows(&rows);
    assert_eq!(table.get(0, "a"), Some(&Value::Missing));
    assert_eq!(table.get(0, "b"), Some(&Value::Missing));
}

#[test]
fn rename_and_drop() {
    let rows = rows_from(json!([{"mic": 1.0, "var1": "strain", "keep": 2.0}]));
    let mut table = Table::from_json_rows(&rows);
    table.rename_column("mic", "MIC");
    table.drop_columns(&["var1"]);
    assert_eq!(table.columns(), &["MIC", "keep"]);
    assert_eq!(table.get(0, "MIC"), Some(&Value::Num(1.0)));
    assert_eq!(table.get(0, "keep"), Some(&Value::Num(2.0)));
}

#[test]
fn coerce_numeric_parses_strings_and_keeps_junk() {
    let rows = rows_from(json!([
        {"x": "1.25"},
        {"x": "not-a-number"},
        {"x": null}
    ]));
    let mut table = Table::from_json_rows(&rows);
    table.coerce_numeric("x");
    assert_eq!(table.get(0, "x"), Some(&Value::Num(1.25)));
    assert_eq!(
        table.get(1, "x"),
        Some(&Value::Str("not-a-number".to_string()))
    );
    assert_eq!(table.get(2, "x"), Some(&Value::Missing));
}

#[test]
fn coerce_numeric_strict_drops_junk() {
    let rows = rows_from(json!([{"x": "abc"}, {"x": "2"}]));
    let mut table = Table::from_json_rows(&rows);
    table.coerce_numeric_strict("x");
    assert_eq!(table.get(0, "x"), Some(&Value::Missing));
    assert_eq!(table.get(1, "x"), Some(&Value::Num(2.0)));
}

#[test]
fn ensure_column_is_idempotent() {
    let rows = rows_from(json!([{"a": 1.0}]));
    let mut table = Table::from_json_rows(&rows);
    table.ensure_column("b");
    table.ensure_column("b");
    assert_eq!(table.columns(), &["a", "b"]);
    assert_eq!(table.get(0, "b"), Some(&Value::Missing));
}

#[test]
fn project_pads_missing_columns() {
    let rows = rows_from(json!([{"Comparison": "a vs b", "P_value": 0.01}]));
    let table = Table::from_json_rows(&rows);
    let view = table.project(&["Comparison", "DDlog2MIC", "P_value"]);
    assert_eq!(view.columns(), &["Comparison", "DDlog2MIC", "P_value"]);
    assert_eq!(view.get(0, "DDlog2MIC"), Some(&Value::Missing));
}

#[test]
fn json_round_trip() {
    let rows = rows_from(json!([{"a": 1.5, "b": "x", "c": null}]));
    let table = Table::from_json_rows(&rows);
    let back = table.to_json_rows();
    assert_eq!(back, rows);
}

#[test]
fn render_values() {
    assert_eq!(Value::Num(2.0).render(), "2");
    assert_eq!(Value::Num(2.5).render(), "2.5");
    assert_eq!(Value::Str("x".into()).render(), "x");
    assert_eq!(Value::Missing.render(), "");
}
