//! Recover the experimental factor columns from the MIC table.
//!
//! Everything the normalizer or the engine could have put there is in the
//! known set; whatever survives the subtraction is assumed to be the
//! original grouping columns used to build the model.

use crate::table::Table;

const KNOWN_COLS: [&str; 28] = [
    "MIC",
    "SE_LP",
    "CI_Lower",
    "CI_Upper",
    "Ratio_MIC",
    "Delta_MIC",
    "Estimate",
    "log2Estimate",
    "log2Lower",
    "log2Upper",
    "log2Ratio_MIC",
    "SE_log2Ratio",
    "SE_logDoD",
    "SE_DoD",
    "P_value",
    "DDlog2MIC",
    "DDMIC",
    "Group1",
    "Group2",
    "label",
    "Comparison",
    "contrast",
    "var1",
    "var2",
    "var1_lvlA",
    "var1_lvlB",
    "var2_lvlC",
    "var2_lvlD",
];

pub const MAX_GROUP_COLS: usize = 3;

/// Up to three factor columns, in the MIC table's own order. An empty MIC
/// table falls back to the configured factor selections.
pub fn detect(mic: &Table, factor1: Option<&str>, factor2: Option<&str>) -> Vec<String> {
    if !mic.is_empty() {
        return mic
            .columns()
            .iter()
            .filter(|c| !KNOWN_COLS.contains(&c.as_str()))
            .take(MAX_GROUP_COLS)
            .cloned()
            .collect();
    }
    [factor1, factor2]
        .into_iter()
        .flatten()
        .filter(|f| !f.is_empty())
        .map(|f| f.to_string())
        .collect()
}
