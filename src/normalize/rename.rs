//! Alias-to-canonical column rename maps, one per sub-table kind.
//!
//! The engine's column names drift across versions; every known historical
//! spelling is enumerated here explicitly. First match wins per column and
//! unmatched columns pass through unchanged.

use crate::table::Table;

pub const MIC_ALIASES: &[(&str, &str)] = &[
    ("mic", "MIC"),
    ("lower_ci", "CI_Lower"),
    ("upper_ci", "CI_Upper"),
];

pub const RATIO_ALIASES: &[(&str, &str)] = &[
    ("mic_ratio", "Ratio_MIC"),
    ("MIC_Ratio", "Ratio_MIC"),
    ("lower_ci", "CI_Lower"),
    ("upper_ci", "CI_Upper"),
];

pub const DELTA_ALIASES: &[(&str, &str)] = &[
    ("delta_mic", "Delta_MIC"),
    ("DeltaMIC", "Delta_MIC"),
    ("delta", "Delta_MIC"),
    ("lower_ci", "CI_Lower"),
    ("upper_ci", "CI_Upper"),
    ("lcl", "CI_Lower"),
    ("ucl", "CI_Upper"),
];

/// Shared by both DoD tables. An engine-side `label` is folded into
/// `Comparison` here so it takes part in the synthesis fallback chain.
pub const DOD_ALIASES: &[(&str, &str)] = &[
    ("p", "P_value"),
    ("P", "P_value"),
    ("p_value", "P_value"),
    ("label", "Comparison"),
];

pub const COEF_ALIASES: &[(&str, &str)] = &[("term", "Term"), ("_row", "Term")];

/// Apply an alias map to every column of `table`. Each column is renamed
/// by the first alias that matches its current name.
pub fn apply(table: &mut Table, aliases: &[(&str, &str)]) {
    for idx in 0..table.n_cols() {
        let current = table.columns()[idx].clone();
        if let Some((_, to)) = aliases.iter().find(|(from, _)| *from == current) {
            table.set_column_name(idx, to);
        }
    }
}
