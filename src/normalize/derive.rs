//! Derived columns and numeric coercion over the canonical tables.
//!
//! DoD-ratio estimates live on a log2 scale when the engine reports
//! `DDlog2MIC`; the linear and log2 forms are kept in lockstep so the
//! rendered tables, exports and generated report read the same numbers.
//! log2 of a confidence bound is only defined for positive bounds;
//! non-positive bounds propagate as missing, never as an error.

use crate::table::{Table, Value};

/// Fields coerced to numeric across all five canonical tables when present
/// and not missing. Unparseable values pass through unchanged.
pub const NUMERIC_FIELDS: [&str; 6] = [
    "MIC",
    "Ratio_MIC",
    "Delta_MIC",
    "Estimate",
    "CI_Lower",
    "CI_Upper",
];

pub fn derive_dod_ratio(table: &mut Table) {
    if table.is_empty() {
        return;
    }

    if table.has_column("DDlog2MIC") {
        table.ensure_column("log2Estimate");
        table.ensure_column("Estimate");
        for row in 0..table.n_rows() {
            match table.get(row, "DDlog2MIC").and_then(Value::as_num) {
                Some(dd) => {
                    table.set(row, "log2Estimate", Value::Num(dd));
                    table.set(row, "Estimate", Value::Num(dd.exp2()));
                }
                None => {
                    table.set(row, "log2Estimate", Value::Missing);
                    table.set(row, "Estimate", Value::Missing);
                }
            }
        }
    } else if table.has_column("Estimate") {
        table.ensure_column("log2Estimate");
        for row in 0..table.n_rows() {
            match table.get(row, "Estimate").and_then(Value::as_num) {
                Some(est) => {
                    table.set(row, "Estimate", Value::Num(est));
                    table.set(row, "log2Estimate", Value::Num(est.log2()));
                }
                None => {
                    table.set(row, "Estimate", Value::Missing);
                    table.set(row, "log2Estimate", Value::Missing);
                }
            }
        }
    }

    if table.has_columns(&["CI_Lower", "CI_Upper"]) {
        table.coerce_numeric_strict("CI_Lower");
        table.coerce_numeric_strict("CI_Upper");
        table.ensure_column("log2Lower");
        table.ensure_column("log2Upper");
        for row in 0..table.n_rows() {
            let lower = table.get(row, "CI_Lower").and_then(Value::as_num);
            let upper = table.get(row, "CI_Upper").and_then(Value::as_num);
            table.set(row, "log2Lower", guarded_log2(lower));
            table.set(row, "log2Upper", guarded_log2(upper));
        }
    }

    for field in ["SE_logDoD", "SE_DoD", "P_value"] {
        if table.has_column(field) {
            table.coerce_numeric_strict(field);
        }
    }
}

pub fn derive_dod_delta(table: &mut Table) {
    if table.is_empty() {
        return;
    }

    if table.has_column("DDMIC") {
        table.ensure_column("Estimate");
        for row in 0..table.n_rows() {
            let est = match table.get(row, "DDMIC").and_then(Value::as_num) {
                Some(dd) => Value::Num(dd),
                None => Value::Missing,
            };
            table.set(row, "Estimate", est);
        }
    } else if table.has_column("Estimate") {
        table.coerce_numeric_strict("Estimate");
    }

    if table.has_columns(&["CI_Lower", "CI_Upper"]) {
        table.coerce_numeric_strict("CI_Lower");
        table.coerce_numeric_strict("CI_Upper");
    }
    for field in ["SE_DoD", "P_value"] {
        if table.has_column(field) {
            table.coerce_numeric_strict(field);
        }
    }
}

/// The final pass over every canonical table. Runs after renaming and
/// label synthesis; applying it twice is a no-op.
pub fn coerce_canonical(table: &mut Table) {
    for field in NUMERIC_FIELDS {
        table.coerce_numeric(field);
    }
}

fn guarded_log2(bound: Option<f64>) -> Value {
    match bound {
        Some(b) if b > 0.0 => Value::Num(b.log2()),
        _ => Value::Missing,
    }
}
