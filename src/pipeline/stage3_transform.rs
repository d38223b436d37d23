use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::model::transform::Transform;
use crate::pipeline::Stage;

pub struct Stage3Transform;

impl Stage3Transform {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage3Transform {
    fn name(&self) -> &'static str {
        "stage3_transform"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let transform = Transform::resolve(&ctx.params.rhs, &ctx.params.conc);
        info!(transform = transform.name(), "transform_resolved");
        ctx.transform = Some(transform);
        ctx.report.params.transform = Some(transform.name().to_string());
        Ok(())
    }
}
