use std::path::PathBuf;

use anyhow::Context;

use crate::engine::RawAnalysisResult;
use crate::model::AnalysisParams;
use crate::model::transform::Transform;
use crate::plots::PlotCache;
use crate::run::AnalysisRun;
use crate::schema::v1::MicReportV1;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub out_dir: PathBuf,
    pub json_path: PathBuf,
    pub tables_dir: PathBuf,
}

/// Mutable state threaded through the pipeline stages. The `run` slot is
/// only ever assigned a fully-normalized result; stages that fail leave it
/// exactly as it was.
#[derive(Debug)]
pub struct Ctx {
    pub input: PathBuf,
    pub params: AnalysisParams,
    pub write_json: bool,
    pub write_tsv: bool,
    pub want_plots: bool,
    pub bundle_path: Option<PathBuf>,
    pub data: Option<Table>,
    pub transform: Option<Transform>,
    pub raw_result: Option<RawAnalysisResult>,
    pub run: Option<AnalysisRun>,
    pub group_cols: Vec<String>,
    pub plot_cache: PlotCache,
    pub warnings: Vec<String>,
    pub output: OutputPaths,
    pub report: MicReportV1,
}

impl Ctx {
    pub fn new(
        input: PathBuf,
        out_dir: PathBuf,
        params: AnalysisParams,
        write_json: bool,
        write_tsv: bool,
        want_plots: bool,
        tool_version: &str,
    ) -> Self {
        let json_path = out_dir.join("ordmic.json");
        let tables_dir = out_dir.join("tables");
        let report = MicReportV1::empty(tool_version, &params);
        Self {
            input,
            params,
            write_json,
            write_tsv,
            want_plots,
            bundle_path: None,
            data: None,
            transform: None,
            raw_result: None,
            run: None,
            group_cols: Vec::new(),
            plot_cache: PlotCache::new(),
            warnings: Vec::new(),
            output: OutputPaths {
                out_dir,
                json_path,
                tables_dir,
            },
            report,
        }
    }

    pub fn data(&self) -> anyhow::Result<&Table> {
        self.data.as_ref().context("input data not loaded")
    }

    pub fn transform(&self) -> anyhow::Result<Transform> {
        self.transform.context("transform not resolved")
    }

    pub fn run(&self) -> anyhow::Result<&AnalysisRun> {
        self.run.as_ref().context("analysis run missing")
    }

    /// Publish a completed run, invalidating everything derived from the
    /// previous one.
    pub fn publish_run(&mut self, run: AnalysisRun) {
        self.plot_cache.reset();
        self.group_cols.clear();
        self.run = Some(run);
    }
}
