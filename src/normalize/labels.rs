//! Comparison labels for difference-of-differences rows.
//!
//! DoD rows may arrive with a human-readable label, a raw contrast string,
//! or only the structured factor/level columns. The structured form wins
//! when complete; the level ordering inside each factor (second vs first)
//! follows the sign convention of the underlying contrast.

use crate::table::{Table, Value};

pub const STRUCTURED_COLS: [&str; 6] = [
    "var1",
    "var2",
    "var1_lvlA",
    "var1_lvlB",
    "var2_lvlC",
    "var2_lvlD",
];

pub const FALLBACK_LABEL: &str = "Difference-of-Differences";

/// Resolve the `Comparison` label for every row, then drop the structured
/// var/lvl columns. The table ends up with exactly one label column.
pub fn synthesize(table: &mut Table) {
    if table.is_empty() {
        table.drop_columns(&STRUCTURED_COLS);
        return;
    }

    let structured = table.has_columns(&STRUCTURED_COLS);
    table.ensure_column("Comparison");

    for row in 0..table.n_rows() {
        let label = if structured {
            structured_label(table, row)
        } else {
            match nonempty_str(table, row, "Comparison") {
                Some(s) => s,
                None => match nonempty_str(table, row, "contrast") {
                    Some(s) => s,
                    None => FALLBACK_LABEL.to_string(),
                },
            }
        };
        table.set(row, "Comparison", Value::Str(label));
    }

    table.drop_columns(&STRUCTURED_COLS);
}

fn nonempty_str(table: &Table, row: usize, col: &str) -> Option<String> {
    table
        .get(row, col)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// `"{var1}: {lvlB} vs {lvlA} × {var2}: {lvlD} vs {lvlC}"`
fn structured_label(table: &Table, row: usize) -> String {
    let field = |name: &str| -> String {
        table
            .get(row, name)
            .map(|v| v.render())
            .unwrap_or_default()
    };
    format!(
        "{}: {} vs {} \u{d7} {}: {} vs {}",
        field("var1"),
        field("var1_lvlB"),
        field("var1_lvlA"),
        field("var2"),
        field("var2_lvlD"),
        field("var2_lvlC"),
    )
}
