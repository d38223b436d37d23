use std::fs;

use ordmic::input::{column_levels, find_column, load_csv};
use ordmic::table::Value;
use tempfile::TempDir;

fn write_csv(content: &str) -> (TempDir, std::path::PathBuf) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("data.csv");
    fs::write(&path, content).unwrap();
    (tmp, path)
}

#[test]
fn loose_typing_on_load() {
    let (_tmp, path) = write_csv("score,conc,strain,flag\n1,0.5,WT,true\n2,1.0,mut,false\n");
    let table = load_csv(&path).unwrap();
    assert_eq!(table.columns(), &["score", "conc", "strain", "flag"]);
    assert_eq!(table.get(0, "score"), Some(&Value::Num(1.0)));
    assert_eq!(table.get(0, "strain"), Some(&Value::Str("WT".to_string())));
    assert_eq!(table.get(0, "flag"), Some(&Value::Bool(true)));
}

#[test]
fn blank_and_na_cells_are_missing() {
    let (_tmp, path) = write_csv("a,b\n1,NA\n2,\n");
    let table = load_csv(&path).unwrap();
    assert_eq!(table.get(0, "b"), Some(&Value::Missing));
    assert_eq!(table.get(1, "b"), Some(&Value::Missing));
}

#[test]
fn fully_empty_rows_are_dropped() {
    let (_tmp, path) = write_csv("a,b\n1,x\n,\n2,y\n");
    let table = load_csv(&path).unwrap();
    assert_eq!(table.n_rows(), 2);
}

#[test]
fn short_rows_are_padded() {
    let (_tmp, path) = write_csv("a,b,c\n1,x\n");
    let table = load_csv(&path).unwrap();
    assert_eq!(table.get(0, "c"), Some(&Value::Missing));
}

#[test]
fn levels_are_deduplicated() {
    let (_tmp, path) = write_csv("dose\n10\n2\n1\n10\n");
    let table = load_csv(&path).unwrap();
    assert_eq!(column_levels(&table, "dose").len(), 3);
}

#[test]
fn levels_numeric_order_not_lexical() {
    let (_tmp, path) = write_csv("dose\n10\n2\n1\n");
    let table = load_csv(&path).unwrap();
    assert_eq!(column_levels(&table, "dose"), vec!["1", "2", "10"]);
}

#[test]
fn levels_lexical_for_strings() {
    let (_tmp, path) = write_csv("strain\nmut\nWT\nmut\n");
    let table = load_csv(&path).unwrap();
    assert_eq!(column_levels(&table, "strain"), vec!["WT", "mut"]);
}

#[test]
fn find_column_is_case_insensitive() {
    let (_tmp, path) = write_csv("AssignedScore,Concentration\n1,0.5\n");
    let table = load_csv(&path).unwrap();
    assert_eq!(find_column(&table, "assignedscore"), Some("AssignedScore"));
    assert_eq!(find_column(&table, "concentration"), Some("Concentration"));
    assert_eq!(find_column(&table, "missing"), None);
}
