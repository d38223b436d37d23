use crate::normalize::NormalizedResult;
use crate::plots::AvailablePlots;

/// One completed analysis: canonical tables plus the engine's session
/// metadata. Built in full before being published to the context, replaced
/// wholesale by the next run.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRun {
    pub tables: NormalizedResult,
    pub available_plots: AvailablePlots,
    pub df_used_csv: String,
    pub session_info: String,
    pub proportional_test: String,
}

impl AnalysisRun {
    /// Availability recomputed from table emptiness when the engine did
    /// not report flags. The MIC plot is always offered.
    pub fn derive_available_plots(tables: &NormalizedResult) -> AvailablePlots {
        AvailablePlots {
            mic: true,
            ratio: !tables.ratio.is_empty(),
            delta: !tables.delta.is_empty(),
            dod_ratio: !tables.dod_ratio.is_empty(),
            dod_delta: !tables.dod_delta.is_empty(),
        }
    }
}
