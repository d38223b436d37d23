//! Reproducible export bundle.
//!
//! One ZIP holding the raw upload, the exact cleaned data the engine
//! fitted on, a CSV sheet per canonical table, the generated reproduction
//! scripts and the rendered plot SVGs.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::ctx::Ctx;
use crate::plots::{PLOT_KINDS, sanitize_svg};
use crate::table::Table;

pub mod script;

pub fn write_bundle(path: &Path, ctx: &Ctx) -> Result<()> {
    let run = ctx.run()?;
    let data = ctx.data()?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create bundle {}", path.display()))?;
    let mut zip = zip::ZipWriter::new(std::io::BufWriter::new(file));

    add(&mut zip, "data/raw_input.csv", table_csv(data)?.as_bytes())?;
    let analysis_csv = if run.df_used_csv.is_empty() {
        table_csv(data)?
    } else {
        run.df_used_csv.clone()
    };
    add(&mut zip, script::ANALYSIS_DATA_REL, analysis_csv.as_bytes())?;

    for (sheet, table) in [
        ("MIC", &run.tables.mic),
        ("DeltaMIC", &run.tables.delta),
        ("RatioMIC", &run.tables.ratio),
        ("DoD_Ratio", &run.tables.dod_ratio),
        ("DoD_Delta", &run.tables.dod_delta),
        ("Coefficients", &run.tables.coefficients),
        ("Thresholds", &run.tables.thresholds),
    ] {
        let name = format!("results/tables/{}.csv", sheet);
        add(&mut zip, &name, sheet_csv(table)?.as_bytes())?;
    }

    let transform = ctx.transform()?;
    add(
        &mut zip,
        "analysis.Rmd",
        script::build_rmd_text(&ctx.params, transform).as_bytes(),
    )?;
    add(&mut zip, "README.txt", script::build_readme_text().as_bytes())?;
    add(&mut zip, "reproduce.R", script::build_reproduce_r().as_bytes())?;

    if !run.session_info.is_empty() {
        add(&mut zip, "sessionInfo.txt", run.session_info.as_bytes())?;
    }

    for kind in PLOT_KINDS {
        if !run.available_plots.is_available(kind) {
            continue;
        }
        if let Some(svg) = ctx.plot_cache.get(kind) {
            if svg.len() > 20 {
                let name = format!("results/plot_{}.svg", kind.as_str());
                add(&mut zip, &name, sanitize_svg(svg).as_bytes())?;
            }
        }
    }

    zip.finish().context("failed to finalize bundle")?;
    Ok(())
}

fn add(
    zip: &mut zip::ZipWriter<std::io::BufWriter<std::fs::File>>,
    name: &str,
    content: &[u8],
) -> Result<()> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(name, options)
        .with_context(|| format!("failed to add {} to bundle", name))?;
    zip.write_all(content)
        .with_context(|| format!("failed to write {} into bundle", name))?;
    Ok(())
}

fn table_csv(table: &Table) -> Result<String> {
    let mut w = csv::Writer::from_writer(Vec::new());
    w.write_record(table.columns())?;
    for row in table.rows() {
        w.write_record(row.iter().map(|v| v.render()))?;
    }
    let bytes = w
        .into_inner()
        .map_err(|e| anyhow::anyhow!("csv buffer flush failed: {}", e))?;
    String::from_utf8(bytes).context("csv output was not UTF-8")
}

/// Empty tables still get a sheet, marked the way the in-app workbook
/// marks them.
fn sheet_csv(table: &Table) -> Result<String> {
    if table.is_empty() {
        return Ok("(no data)\n".to_string());
    }
    table_csv(table)
}
