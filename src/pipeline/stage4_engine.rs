use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::engine::{EngineRequest, MicEngine};
use crate::pipeline::Stage;

/// The single suspension point of a run: everything before this stage is
/// local validation, everything after is synchronous normalization.
pub struct Stage4Engine {
    engine: Box<dyn MicEngine>,
}

impl Stage4Engine {
    pub fn new(engine: Box<dyn MicEngine>) -> Self {
        Self { engine }
    }
}

impl Stage for Stage4Engine {
    fn name(&self) -> &'static str {
        "stage4_engine"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let transform = ctx.transform()?;
        let request = EngineRequest::from_params(&ctx.params, transform, ctx.want_plots);
        info!(engine = self.engine.name(), "engine_call_started");
        let raw = self.engine.solve(&request, ctx.data()?)?;
        info!(engine = self.engine.name(), "engine_call_finished");
        ctx.raw_result = Some(raw);
        Ok(())
    }
}
