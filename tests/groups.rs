use ordmic::normalize::groups::detect;
use ordmic::table::Table;
use serde_json::json;

fn table_from(v: serde_json::Value) -> Table {
    let rows: Vec<serde_json::Map<String, serde_json::Value>> = v
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r.as_object().unwrap().clone())
        .collect();
    Table::from_json_rows(&rows)
}

#[test]
fn factor_columns_survive_subtraction() {
    let mic = table_from(json!([{
        "conc_strain": "WT", "conc_treatment": "ctrl",
        "MIC": 1.5, "CI_Lower": 0.5, "CI_Upper": 2.5
    }]));
    let cols = detect(&mic, None, None);
    assert_eq!(cols, vec!["conc_strain", "conc_treatment"]);
}

#[test]
fn at_most_three_columns_returned() {
    let mic = table_from(json!([{
        "f1": "a", "f2": "b", "f3": "c", "f4": "d", "MIC": 1.0
    }]));
    let cols = detect(&mic, None, None);
    assert_eq!(cols, vec!["f1", "f2", "f3"]);
}

#[test]
fn all_known_columns_yield_nothing() {
    let mic = table_from(json!([{
        "MIC": 1.0, "SE_LP": 0.1, "CI_Lower": 0.5, "CI_Upper": 2.0,
        "Comparison": "x", "label": "y", "var1": "a", "DDlog2MIC": 0.2
    }]));
    let cols = detect(&mic, None, None);
    assert!(cols.is_empty());
}

#[test]
fn empty_table_falls_back_to_selected_factors() {
    let cols = detect(&Table::empty(), Some("strain"), Some("treatment"));
    assert_eq!(cols, vec!["strain", "treatment"]);
}

#[test]
fn empty_table_skips_blank_factor_selections() {
    let cols = detect(&Table::empty(), Some("strain"), Some(""));
    assert_eq!(cols, vec!["strain"]);
    let none = detect(&Table::empty(), None, None);
    assert!(none.is_empty());
}

#[test]
fn order_follows_table_columns() {
    let mic = table_from(json!([{
        "MIC": 1.0, "zeta": "z", "alpha": "a"
    }]));
    let cols = detect(&mic, None, None);
    assert_eq!(cols, vec!["zeta", "alpha"]);
}
