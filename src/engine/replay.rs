use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::engine::{EngineRequest, MicEngine, RawAnalysisResult};
use crate::table::Table;

/// Replays a captured engine response from a JSON file. Used for offline
/// runs against a saved result and throughout the integration tests.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    path: PathBuf,
}

impl ReplayEngine {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MicEngine for ReplayEngine {
    fn name(&self) -> &'static str {
        "replay"
    }

    fn solve(&self, _req: &EngineRequest, _data: &Table) -> Result<RawAnalysisResult> {
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read engine result {}", self.path.display()))?;
        let result: RawAnalysisResult = serde_json::from_str(&content)
            .with_context(|| format!("malformed engine result {}", self.path.display()))?;
        if let Some(err) = &result.error {
            bail!("{}", err);
        }
        Ok(result)
    }
}
