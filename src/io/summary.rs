use anyhow::Result;

use crate::ctx::Ctx;
use crate::plots::PLOT_KINDS;

pub fn format_summary(ctx: &Ctx) -> Result<String> {
    let version = env!("CARGO_PKG_VERSION");
    let run = ctx.run()?;
    let data = ctx.data()?;

    let mut out = String::new();
    out.push_str(&format!("ordmic v{}\n", version));
    out.push_str(&format!(
        "Input: {} rows, {} columns\n",
        data.n_rows(),
        data.n_cols()
    ));
    if let Some(transform) = ctx.transform {
        out.push_str(&format!("Transform: {}\n", transform.name()));
    }
    out.push_str(&format!(
        "MIC estimates: {}\n",
        run.tables.mic.n_rows()
    ));
    out.push_str(&format!(
        "Comparisons: ratio={} delta={} dod_ratio={} dod_delta={}\n",
        run.tables.ratio.n_rows(),
        run.tables.delta.n_rows(),
        run.tables.dod_ratio.n_rows(),
        run.tables.dod_delta.n_rows()
    ));
    out.push_str(&format!(
        "Model terms: {} coefficients, {} thresholds\n",
        run.tables.coefficients.n_rows(),
        run.tables.thresholds.n_rows()
    ));

    if ctx.group_cols.is_empty() {
        out.push_str("Groups: none\n");
    } else {
        out.push_str(&format!("Groups: {}\n", ctx.group_cols.join(", ")));
    }

    let available: Vec<&str> = PLOT_KINDS
        .iter()
        .filter(|k| run.available_plots.is_available(**k))
        .map(|k| k.as_str())
        .collect();
    if available.is_empty() {
        out.push_str("Plots: none\n");
    } else {
        out.push_str(&format!("Plots: {}\n", available.join(", ")));
    }

    Ok(out)
}
