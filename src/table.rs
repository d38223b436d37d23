//! Ordered-column tables over loosely-typed cell values.
//!
//! The engine returns data frames with arbitrary column names and mixed
//! types; everything past the normalizer works on `Table`, which keeps
//! column order and row order exactly as emitted.

use serde_json::Map;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Num(f64),
    Str(String),
    Bool(bool),
    Missing,
}

impl Value {
    pub fn from_json(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Missing,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => Value::Num(f),
                None => Value::Str(n.to_string()),
            },
            serde_json::Value::String(s) => {
                if s == "NA" {
                    Value::Missing
                } else {
                    Value::Str(s.clone())
                }
            }
            other => Value::Str(other.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Num(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Missing => serde_json::Value::Null,
        }
    }

    /// Numeric view: numbers as-is, parseable strings parsed, all else None.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(f) => Some(*f),
            Value::Str(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Display form used by TSV and CSV writers.
    pub fn render(&self) -> String {
        match self {
            Value::Num(f) => format_num(*f),
            Value::Str(s) => s.clone(),
            Value::Bool(b) => b.to_string(),
            Value::Missing => String::new(),
        }
    }
}

fn format_num(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f == f.trunc() && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        format!("{}", f)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.has_column(n))
    }

    pub fn push_row(&mut self, row: Vec<Value>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    pub fn set(&mut self, row: usize, name: &str, value: Value) {
        if let Some(idx) = self.column_index(name) {
            if let Some(r) = self.rows.get_mut(row) {
                r[idx] = value;
            }
        }
    }

    /// Rename the first column called `from` to `to`.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(idx) = self.column_index(from) {
            self.columns[idx] = to.to_string();
        }
    }

    pub fn set_column_name(&mut self, idx: usize, name: &str) {
        if idx < self.columns.len() {
            self.columns[idx] = name.to_string();
        }
    }

    /// Append a column; `values` must be one per row.
    pub fn add_column(&mut self, name: &str, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.to_string());
        for (row, v) in self.rows.iter_mut().zip(values) {
            row.push(v);
        }
    }

    /// Append a column if absent, filled with Missing; returns its index.
    pub fn ensure_column(&mut self, name: &str) -> usize {
        if let Some(idx) = self.column_index(name) {
            return idx;
        }
        self.columns.push(name.to_string());
        for row in self.rows.iter_mut() {
            row.push(Value::Missing);
        }
        self.columns.len() - 1
    }

    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| !names.contains(&self.columns[i].as_str()))
            .collect();
        if keep.len() == self.columns.len() {
            return;
        }
        self.columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        for row in self.rows.iter_mut() {
            *row = keep.iter().map(|&i| row[i].clone()).collect();
        }
    }

    /// Coerce every present, non-missing cell of `name` to numeric.
    /// Cells that do not parse are left untouched.
    pub fn coerce_numeric(&mut self, name: &str) {
        let Some(idx) = self.column_index(name) else {
            return;
        };
        for row in self.rows.iter_mut() {
            if row[idx].is_missing() {
                continue;
            }
            if let Some(n) = row[idx].as_num() {
                row[idx] = Value::Num(n);
            }
        }
    }

    /// Coerce with R `as.numeric` semantics: unparseable becomes Missing.
    pub fn coerce_numeric_strict(&mut self, name: &str) {
        let Some(idx) = self.column_index(name) else {
            return;
        };
        for row in self.rows.iter_mut() {
            row[idx] = match row[idx].as_num() {
                Some(n) => Value::Num(n),
                None => Value::Missing,
            };
        }
    }

    /// Build from JSON rows as emitted by `jsonlite::toJSON(dataframe="rows")`.
    /// Column order comes from first appearance across all rows; fields a
    /// row lacks become Missing.
    pub fn from_json_rows(rows: &[Map<String, serde_json::Value>]) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in rows {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        let mut table = Table::new(columns);
        for row in rows {
            let values = table
                .columns
                .iter()
                .map(|c| row.get(c).map(Value::from_json).unwrap_or(Value::Missing))
                .collect();
            table.rows.push(values);
        }
        table
    }

    pub fn to_json_rows(&self) -> Vec<Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut map = Map::new();
                for (col, v) in self.columns.iter().zip(row) {
                    map.insert(col.clone(), v.to_json());
                }
                map
            })
            .collect()
    }

    /// Keep only `names` (in the given order), padding absent columns with
    /// Missing.
    pub fn project(&self, names: &[&str]) -> Table {
        let mut out = Table::new(names.iter().map(|s| s.to_string()).collect());
        for row_idx in 0..self.rows.len() {
            let values = names
                .iter()
                .map(|n| {
                    self.get(row_idx, n)
                        .cloned()
                        .unwrap_or(Value::Missing)
                })
                .collect();
            out.rows.push(values);
        }
        out
    }
}
