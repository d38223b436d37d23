use serde::{Deserialize, Serialize};
use serde_json::Map;

use crate::model::{AnalysisParams, Link};
use crate::plots::AvailablePlots;

pub type JsonRows = Vec<Map<String, serde_json::Value>>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorMeta {
    pub name: String,
    pub baseline: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamsMeta {
    pub score: String,
    pub conc: String,
    pub link: Link,
    pub rhs: String,
    pub factor1: Option<FactorMeta>,
    pub factor2: Option<FactorMeta>,
    pub share_pairs: bool,
    pub transform: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableSet {
    pub mic: JsonRows,
    pub ratio: JsonRows,
    pub delta: JsonRows,
    pub dod_ratio: JsonRows,
    pub dod_delta: JsonRows,
    pub coefficients: JsonRows,
    pub thresholds: JsonRows,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagnostics {
    pub proportional_test: Option<String>,
    pub session_info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicReportV1 {
    pub tool: String,
    pub version: String,
    pub schema_version: String,
    pub params: ParamsMeta,
    pub group_cols: Vec<String>,
    pub tables: TableSet,
    pub available_plots: AvailablePlots,
    pub diagnostics: Diagnostics,
}

impl MicReportV1 {
    pub fn empty(tool_version: &str, params: &AnalysisParams) -> Self {
        Self {
            tool: "ordmic".to_string(),
            version: tool_version.to_string(),
            schema_version: "v1".to_string(),
            params: ParamsMeta {
                score: params.score.clone(),
                conc: params.conc.clone(),
                link: params.link,
                rhs: params.rhs.clone(),
                factor1: params.factor1.as_ref().map(|f| FactorMeta {
                    name: f.name.clone(),
                    baseline: f.baseline.clone(),
                }),
                factor2: params.factor2.as_ref().map(|f| FactorMeta {
                    name: f.name.clone(),
                    baseline: f.baseline.clone(),
                }),
                share_pairs: params.share_pairs,
                transform: None,
            },
            group_cols: Vec::new(),
            tables: TableSet::default(),
            available_plots: AvailablePlots::default(),
            diagnostics: Diagnostics::default(),
        }
    }
}
