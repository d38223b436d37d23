use anyhow::Result;
use tracing::info;

use crate::ctx::Ctx;
use crate::normalize::groups;
use crate::pipeline::Stage;

pub struct Stage6Groups;

impl Stage6Groups {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage6Groups {
    fn name(&self) -> &'static str {
        "stage6_groups"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        let run = ctx.run()?;
        let group_cols = groups::detect(
            &run.tables.mic,
            ctx.params.factor1.as_ref().map(|f| f.name.as_str()),
            ctx.params.factor2.as_ref().map(|f| f.name.as_str()),
        );
        info!(group_cols = %group_cols.join(","), "group_cols_detected");
        ctx.group_cols = group_cols;
        Ok(())
    }
}
