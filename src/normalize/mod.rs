//! Raw engine result to canonical tables.
//!
//! Total over any plausible engine response: absent sub-tables become
//! empty tables, unknown columns pass through, and nothing here can fail.

use crate::engine::{RawAnalysisResult, RawRows};
use crate::table::{Table, Value};

pub mod derive;
pub mod groups;
pub mod labels;
pub mod rename;

#[derive(Debug, Clone, Default)]
pub struct NormalizedResult {
    pub mic: Table,
    pub ratio: Table,
    pub delta: Table,
    pub dod_ratio: Table,
    pub dod_delta: Table,
    pub coefficients: Table,
    pub thresholds: Table,
}

pub fn normalize(raw: &RawAnalysisResult) -> NormalizedResult {
    let mut mic = to_table(raw.mic_estimates.as_ref());
    rename::apply(&mut mic, rename::MIC_ALIASES);

    let mut ratio = to_table(raw.ratio_mic_results.as_ref());
    rename::apply(&mut ratio, rename::RATIO_ALIASES);

    let mut delta = to_table(raw.delta_mic_results.as_ref());
    rename::apply(&mut delta, rename::DELTA_ALIASES);

    let mut dod_ratio = to_table(raw.dod_ratio_results.as_ref());
    rename::apply(&mut dod_ratio, rename::DOD_ALIASES);
    labels::synthesize(&mut dod_ratio);
    derive::derive_dod_ratio(&mut dod_ratio);

    let mut dod_delta = to_table(raw.dod_delta_results.as_ref());
    rename::apply(&mut dod_delta, rename::DOD_ALIASES);
    labels::synthesize(&mut dod_delta);
    derive::derive_dod_delta(&mut dod_delta);

    for table in [&mut mic, &mut ratio, &mut delta, &mut dod_ratio, &mut dod_delta] {
        derive::coerce_canonical(table);
    }

    let (coefficients, thresholds) = split_summary(raw.coefficients.as_ref());

    NormalizedResult {
        mic,
        ratio,
        delta,
        dod_ratio,
        dod_delta,
        coefficients,
        thresholds,
    }
}

fn to_table(rows: Option<&RawRows>) -> Table {
    match rows {
        Some(rows) => Table::from_json_rows(rows),
        None => Table::empty(),
    }
}

/// Split the model summary: a row is a threshold (cut-point) row iff its
/// term label contains `|`; everything else is a structural coefficient.
/// Emission order is preserved in both halves.
pub fn split_summary(rows: Option<&RawRows>) -> (Table, Table) {
    let mut summary = to_table(rows);
    rename::apply(&mut summary, rename::COEF_ALIASES);

    let mut coefficients = Table::new(summary.columns().to_vec());
    let mut thresholds = Table::new(summary.columns().to_vec());
    for (idx, row) in summary.rows().iter().enumerate() {
        let is_threshold = matches!(
            summary.get(idx, "Term"),
            Some(Value::Str(term)) if term.contains('|')
        );
        if is_threshold {
            thresholds.push_row(row.clone());
        } else {
            coefficients.push_row(row.clone());
        }
    }
    (coefficients, thresholds)
}
