use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::model::Link;

#[derive(Debug, Parser)]
#[command(name = "ordmic", version, about = "Ordinal MIC analysis orchestration CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    Run(RunArgs),
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(long, help = "Input CSV with ordinal scores and concentrations")]
    pub input: PathBuf,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, help = "Ordinal score column")]
    pub score: String,

    #[arg(long, help = "Concentration column")]
    pub conc: String,

    #[arg(long, value_enum, default_value_t = Link::Logit)]
    pub link: Link,

    #[arg(
        long,
        default_value = "",
        help = "Model formula RHS; default is log1p(`conc`) plus the factor interaction"
    )]
    pub rhs: String,

    #[arg(long, help = "First factor column")]
    pub factor1: Option<String>,

    #[arg(long, help = "Baseline (reference) level for --factor1")]
    pub baseline1: Option<String>,

    #[arg(long, help = "Second factor column")]
    pub factor2: Option<String>,

    #[arg(long, help = "Baseline (reference) level for --factor2")]
    pub baseline2: Option<String>,

    #[arg(
        long,
        default_value_t = false,
        help = "Restrict pairwise comparisons to groups sharing a factor level"
    )]
    pub share_pairs: bool,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long, default_value_t = false)]
    pub tsv: bool,

    #[arg(long, default_value_t = false, help = "Ask the engine to render plot SVGs")]
    pub plots: bool,

    #[arg(long, help = "Write the reproducible results bundle (ZIP) to this path")]
    pub bundle: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = EngineArg::Rscript)]
    pub engine: EngineArg,

    #[arg(long, help = "Path to the Rscript executable (engine=rscript)")]
    pub rscript: Option<PathBuf>,

    #[arg(long, help = "Captured engine result JSON (engine=replay)")]
    pub replay: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long, help = "Input CSV with ordinal scores and concentrations")]
    pub input: PathBuf,

    #[arg(long, help = "Ordinal score column (hinted from the data when omitted)")]
    pub score: Option<String>,

    #[arg(long, help = "Concentration column (hinted from the data when omitted)")]
    pub conc: Option<String>,

    #[arg(long, help = "First factor column")]
    pub factor1: Option<String>,

    #[arg(long, help = "Second factor column")]
    pub factor2: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineArg {
    Rscript,
    Replay,
}
