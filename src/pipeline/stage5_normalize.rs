use anyhow::{Context, Result};
use tracing::info;

use crate::ctx::Ctx;
use crate::normalize;
use crate::pipeline::Stage;
use crate::run::AnalysisRun;

pub struct Stage5Normalize;

impl Stage5Normalize {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Normalize {
    fn name(&self) -> &'static str {
        "stage5_normalize"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let raw = ctx.raw_result.as_ref().context("engine result missing")?;
        let tables = normalize::normalize(raw);

        let available_plots = raw
            .available_plots
            .unwrap_or_else(|| AnalysisRun::derive_available_plots(&tables));

        let run = AnalysisRun {
            available_plots,
            df_used_csv: raw.df_used_csv.clone().unwrap_or_default(),
            session_info: raw.session_info.clone().unwrap_or_default(),
            proportional_test: raw.proportional_test.clone().unwrap_or_default(),
            tables,
        };

        info!(
            mic_rows = run.tables.mic.n_rows(),
            ratio_rows = run.tables.ratio.n_rows(),
            delta_rows = run.tables.delta.n_rows(),
            dod_ratio_rows = run.tables.dod_ratio.n_rows(),
            dod_delta_rows = run.tables.dod_delta.n_rows(),
            "normalized"
        );
        ctx.publish_run(run);
        Ok(())
    }
}
