//! Configuration validation. Everything here fails before the engine is
//! ever invoked, with messages that tell the user which selection to fix.

use anyhow::{Result, bail};
use tracing::info;

use crate::ctx::Ctx;
use crate::input;
use crate::model;
use crate::pipeline::Stage;

pub struct Stage2Config;

impl Stage2Config {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage2Config {
    fn name(&self) -> &'static str {
        "stage2_config"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let data = ctx.data()?;

        if ctx.params.score.is_empty() || ctx.params.conc.is_empty() {
            bail!("Please select Score, Concentration, and at least one Factor variable.");
        }
        for (what, column) in [("score", &ctx.params.score), ("concentration", &ctx.params.conc)] {
            if !data.has_column(column) {
                bail!(
                    "{} column '{}' not found in input (columns: {})",
                    what,
                    column,
                    data.columns().join(", ")
                );
            }
        }

        for factor in ctx.params.factors() {
            if !data.has_column(&factor.name) {
                bail!("factor column '{}' not found in input", factor.name);
            }
            if let Some(baseline) = &factor.baseline {
                let levels = input::column_levels(data, &factor.name);
                if !levels.iter().any(|l| l == baseline) {
                    bail!(
                        "baseline '{}' is not a level of '{}' (levels: {})",
                        baseline,
                        factor.name,
                        levels.join(", ")
                    );
                }
            }
        }

        if ctx.params.rhs.trim().is_empty() {
            ctx.params.rhs = model::default_rhs(
                &ctx.params.conc,
                ctx.params.factor1.as_ref().map(|f| f.name.as_str()),
                ctx.params.factor2.as_ref().map(|f| f.name.as_str()),
            );
            info!(rhs = %ctx.params.rhs, "formula_defaulted");
        }

        ctx.report.params.rhs = ctx.params.rhs.clone();
        info!("config_valid");
        Ok(())
    }
}
