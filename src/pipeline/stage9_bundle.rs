use anyhow::{Context, Result};
use tracing::info;

use crate::bundle;
use crate::ctx::Ctx;
use crate::pipeline::Stage;

/// Bundle assembly failures are reported on their own; the analysis run
/// and the TSV/JSON outputs already written stay valid.
pub struct Stage9Bundle;

impl Stage9Bundle {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage9Bundle {
    fn name(&self) -> &'static str {
        "stage9_bundle"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let Some(path) = ctx.bundle_path.clone() else {
            return Ok(());
        };
        bundle::write_bundle(&path, ctx)
            .with_context(|| format!("failed to build results bundle {}", path.display()))?;
        info!(bundle = %path.display(), "bundle_ready");
        Ok(())
    }
}
