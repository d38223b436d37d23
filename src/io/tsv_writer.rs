use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::ctx::Ctx;
use crate::table::Table;

/// Canonical table names paired with their TSV file stems. The same names
/// label the workbook sheets in the export bundle.
pub const TABLE_FILES: [(&str, &str); 7] = [
    ("MIC", "mic"),
    ("RatioMIC", "ratio_mic"),
    ("DeltaMIC", "delta_mic"),
    ("DoD_Ratio", "dod_ratio"),
    ("DoD_Delta", "dod_delta"),
    ("Coefficients", "coefficients"),
    ("Thresholds", "thresholds"),
];

pub fn write_tables(dir: &Path, ctx: &Ctx) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;

    for (name, stem) in TABLE_FILES {
        let table = table_by_name(ctx, name)?;
        let path = dir.join(format!("{}.tsv", stem));
        write_table(&path, table)?;
    }
    Ok(())
}

pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = BufWriter::new(file);

    writeln!(w, "{}", table.columns().join("\t"))?;
    for row in table.rows() {
        let line: Vec<String> = row.iter().map(|v| v.render()).collect();
        writeln!(w, "{}", line.join("\t"))?;
    }
    Ok(())
}

fn table_by_name<'a>(ctx: &'a Ctx, name: &str) -> Result<&'a Table> {
    let run = ctx.run()?;
    Ok(match name {
        "MIC" => &run.tables.mic,
        "RatioMIC" => &run.tables.ratio,
        "DeltaMIC" => &run.tables.delta,
        "DoD_Ratio" => &run.tables.dod_ratio,
        "DoD_Delta" => &run.tables.dod_delta,
        "Coefficients" => &run.tables.coefficients,
        "Thresholds" => &run.tables.thresholds,
        other => anyhow::bail!("unknown table '{}'", other),
    })
}
