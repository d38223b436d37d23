use ordmic::bundle::script::{build_readme_text, build_reproduce_r, build_rmd_text};
use ordmic::engine::EngineRequest;
use ordmic::engine::rscript::build_program;
use ordmic::model::transform::Transform;
use ordmic::model::{AnalysisParams, Factor, Link};

fn params() -> AnalysisParams {
    AnalysisParams {
        score: "score".to_string(),
        conc: "conc".to_string(),
        link: Link::Logit,
        rhs: "log1p(`conc`) + `strain` * `treatment`".to_string(),
        factor1: Some(Factor {
            name: "strain".to_string(),
            baseline: Some("WT".to_string()),
        }),
        factor2: Some(Factor {
            name: "treatment".to_string(),
            baseline: None,
        }),
        share_pairs: true,
    }
}

#[test]
fn rmd_references_transform_pair() {
    let rmd = build_rmd_text(&params(), Transform::Log1p);
    assert!(rmd.contains("tf  <- function(x) log1p(x)"));
    assert!(rmd.contains("inv <- function(y) expm1(y)"));
}

#[test]
fn rmd_relevels_factors() {
    let rmd = build_rmd_text(&params(), Transform::Log1p);
    assert!(rmd.contains("stats::relevel(as.factor(df[['strain']]), ref='WT')"));
    assert!(rmd.contains("df[['treatment']] <- as.factor(df[['treatment']])"));
}

#[test]
fn rmd_carries_model_settings() {
    let rmd = build_rmd_text(&params(), Transform::Log1p);
    assert!(rmd.contains("link = \"logit\""));
    assert!(rmd.contains("`score` ~ log1p(`conc`) + `strain` * `treatment`"));
    assert!(rmd.contains("compare_pairs = 'share_any'"));
}

#[test]
fn rmd_omits_share_pairs_when_unset() {
    let mut p = params();
    p.share_pairs = false;
    let rmd = build_rmd_text(&p, Transform::Log1p);
    assert!(!rmd.contains("compare_pairs"));
}

#[test]
fn readme_and_reproduce_mention_the_rmd() {
    assert!(build_readme_text().contains("analysis.Rmd"));
    assert!(build_reproduce_r().contains("rmarkdown::render(\"analysis.Rmd\""));
}

#[test]
fn engine_program_carries_request() {
    let req = EngineRequest::from_params(&params(), Transform::Log1p, false);
    let program = build_program(&req, "/tmp/input.csv");
    assert!(program.contains("ordinal::clm"));
    assert!(program.contains("ordinalMIC::mic_solve"));
    assert!(program.contains("transform_fun = function(x) log1p(x)"));
    assert!(program.contains("inv_transform_fun = function(y) expm1(y), compare_pairs = 'share_any'"));
    assert!(program.contains("link = \"logit\""));
    assert!(program.contains("\"`score` ~ log1p(`conc`) + `strain` * `treatment`\""));
    assert!(program.contains("plots <- NULL"));
}

#[test]
fn engine_program_renders_plots_on_request() {
    let req = EngineRequest::from_params(&params(), Transform::Log1p, true);
    let program = build_program(&req, "/tmp/input.csv");
    assert!(program.contains("svglite::stringSVG"));
    assert!(program.contains("autoplot(mic_analysis, type = \"DoD_ratio\")"));
}
