use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::pipeline::Stage;
use crate::plots::PLOT_KINDS;

/// Seeds the per-run SVG cache with whatever the engine rendered. Each
/// kind lands in the cache at most once; the cache was reset wholesale
/// when the run was published.
pub struct Stage7Plots;

impl Stage7Plots {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage7Plots {
    fn name(&self) -> &'static str {
        "stage7_plots"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let Some(raw) = ctx.raw_result.as_ref() else {
            return Ok(());
        };
        let Some(plots) = raw.plots.clone() else {
            info!("no_plots_in_response");
            return Ok(());
        };

        let available = ctx.run()?.available_plots;
        for kind in PLOT_KINDS {
            if !available.is_available(kind) {
                continue;
            }
            if let Some(svg) = plots.get(kind.as_str()) {
                ctx.plot_cache.insert(kind, svg.clone());
            }
        }
        if let Some(kind) = available.preferred() {
            info!(default_plot = kind.as_str(), "default_plot_selected");
        }
        info!(cached = ctx.plot_cache.len(), "plot_cache_seeded");
        Ok(())
    }
}
