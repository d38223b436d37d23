//! CSV input loading.
//!
//! Values are typed loosely on the way in (number / bool / string /
//! missing); rows with no non-blank value at all are dropped before
//! anything else sees them.

use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::table::{Table, Value};

pub fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(std::io::BufReader::new(file));

    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .clone();
    if headers.is_empty() {
        bail!("{} has no header row", path.display());
    }
    let columns: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();

    let mut table = Table::new(columns);
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("{}:{} malformed CSV row", path.display(), idx + 2))?;
        let mut values: Vec<Value> = Vec::with_capacity(table.n_cols());
        for col in 0..table.n_cols() {
            values.push(parse_cell(record.get(col).unwrap_or("")));
        }
        if values.iter().all(Value::is_missing) {
            continue;
        }
        table.push_row(values);
    }
    Ok(table)
}

fn parse_cell(raw: &str) -> Value {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "NA" {
        return Value::Missing;
    }
    if let Ok(n) = trimmed.parse::<f64>() {
        return Value::Num(n);
    }
    match trimmed {
        "true" | "TRUE" => Value::Bool(true),
        "false" | "FALSE" => Value::Bool(false),
        _ => Value::Str(trimmed.to_string()),
    }
}

/// Distinct non-missing levels of a column, in display order (numeric when
/// every level parses as a number, lexical otherwise).
pub fn column_levels(table: &Table, column: &str) -> Vec<String> {
    let mut levels: Vec<String> = Vec::new();
    for row in 0..table.n_rows() {
        if let Some(v) = table.get(row, column) {
            if v.is_missing() {
                continue;
            }
            let rendered = v.render();
            let level = rendered.trim();
            if level.is_empty() {
                continue;
            }
            if !levels.iter().any(|l| l == level) {
                levels.push(level.to_string());
            }
        }
    }
    crate::model::sort_levels(&mut levels);
    levels
}

/// Case-insensitive column lookup, returning the stored spelling.
pub fn find_column<'a>(table: &'a Table, name: &str) -> Option<&'a str> {
    table
        .columns()
        .iter()
        .find(|c| c.eq_ignore_ascii_case(name))
        .map(|c| c.as_str())
}
