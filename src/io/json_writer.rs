use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::schema::v1::{Diagnostics, MicReportV1, TableSet};

pub fn build_report(ctx: &Ctx) -> Result<MicReportV1> {
    let run = ctx.run()?;
    let mut report = MicReportV1::empty(env!("CARGO_PKG_VERSION"), &ctx.params);

    report.params.transform = ctx.transform.map(|t| t.name().to_string());
    report.group_cols = ctx.group_cols.clone();
    report.tables = TableSet {
        mic: run.tables.mic.to_json_rows(),
        ratio: run.tables.ratio.to_json_rows(),
        delta: run.tables.delta.to_json_rows(),
        dod_ratio: run.tables.dod_ratio.to_json_rows(),
        dod_delta: run.tables.dod_delta.to_json_rows(),
        coefficients: run.tables.coefficients.to_json_rows(),
        thresholds: run.tables.thresholds.to_json_rows(),
    };
    report.available_plots = run.available_plots;
    report.diagnostics = Diagnostics {
        proportional_test: some_nonempty(&run.proportional_test),
        session_info: some_nonempty(&run.session_info),
    };

    Ok(report)
}

pub fn write_json(path: &Path, ctx: &Ctx) -> Result<()> {
    let report = build_report(ctx)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}

fn some_nonempty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
