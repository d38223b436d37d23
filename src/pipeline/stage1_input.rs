use anyhow::{Result, bail};
use tracing::info;

use crate::ctx::Ctx;
use crate::input;
use crate::pipeline::Stage;

pub struct Stage1Input;

impl Stage1Input {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage1Input {
    fn name(&self) -> &'static str {
        "stage1_input"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let table = input::load_csv(&ctx.input)?;
        if table.is_empty() {
            bail!("{} contains no data rows", ctx.input.display());
        }

        let mut seen: Vec<&str> = Vec::new();
        for col in table.columns() {
            if seen.contains(&col.as_str()) {
                ctx.warnings
                    .push(format!("duplicate column name '{}' in input", col));
            } else {
                seen.push(col);
            }
        }

        info!(
            rows = table.n_rows(),
            columns = table.n_cols(),
            "input_loaded"
        );
        ctx.data = Some(table);
        Ok(())
    }
}
