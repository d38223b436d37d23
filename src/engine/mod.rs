//! The external statistical engine boundary.
//!
//! The engine owns model fitting, MIC solving and plotting. This crate
//! only constructs the request and consumes the loosely-shaped response;
//! the loose shape stops at the normalizer.

use std::collections::HashMap;

use anyhow::Result;
use serde::Deserialize;
use serde_json::Map;

use crate::model::{AnalysisParams, Factor, Link};
use crate::model::transform::Transform;
use crate::plots::AvailablePlots;
use crate::table::Table;

pub mod replay;
pub mod rscript;

/// Rows of a data-frame-shaped sub-table, exactly as the engine emitted
/// them. Field names and types vary across engine versions.
pub type RawRows = Vec<Map<String, serde_json::Value>>;

#[derive(Debug, Clone)]
pub struct EngineRequest {
    pub score: String,
    pub conc: String,
    pub link: Link,
    pub rhs: String,
    pub factor1: Option<Factor>,
    pub factor2: Option<Factor>,
    pub share_pairs: bool,
    pub transform: Transform,
    pub want_plots: bool,
}

impl EngineRequest {
    pub fn from_params(params: &AnalysisParams, transform: Transform, want_plots: bool) -> Self {
        Self {
            score: params.score.clone(),
            conc: params.conc.clone(),
            link: params.link,
            rhs: params.rhs.clone(),
            factor1: params.factor1.clone(),
            factor2: params.factor2.clone(),
            share_pairs: params.share_pairs,
            transform,
            want_plots,
        }
    }
}

/// The engine response before normalization. Every sub-table is optional;
/// the normalizer turns absent tables into empty ones.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAnalysisResult {
    #[serde(default)]
    pub mic_estimates: Option<RawRows>,
    #[serde(default)]
    pub ratio_mic_results: Option<RawRows>,
    #[serde(default)]
    pub delta_mic_results: Option<RawRows>,
    #[serde(default)]
    pub dod_ratio_results: Option<RawRows>,
    #[serde(default)]
    pub dod_delta_results: Option<RawRows>,
    #[serde(default)]
    pub coefficients: Option<RawRows>,
    #[serde(default)]
    pub available_plots: Option<AvailablePlots>,
    #[serde(default)]
    pub plots: Option<HashMap<String, String>>,
    #[serde(default)]
    pub df_used_csv: Option<String>,
    #[serde(default)]
    pub session_info: Option<String>,
    #[serde(default)]
    pub proportional_test: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub trait MicEngine {
    fn name(&self) -> &'static str;

    /// Fit the model and solve MICs for `data`. An `Err` carries the
    /// engine's own error text and aborts the run; the response may still
    /// have any subset of sub-tables populated.
    fn solve(&self, req: &EngineRequest, data: &Table) -> Result<RawAnalysisResult>;
}
