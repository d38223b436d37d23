use std::fs;
use std::io::Read;

use ordmic::bundle::write_bundle;
use ordmic::ctx::Ctx;
use ordmic::input::load_csv;
use ordmic::model::transform::Transform;
use ordmic::model::{AnalysisParams, Factor, Link};
use ordmic::normalize::normalize;
use ordmic::plots::PlotKind;
use ordmic::run::AnalysisRun;
use tempfile::TempDir;

fn make_ctx(tmp: &TempDir) -> Ctx {
    let input = tmp.path().join("input.csv");
    fs::write(&input, "score,conc,strain\n0,0,WT\n1,1,mut\n").unwrap();

    let params = AnalysisParams {
        score: "score".to_string(),
        conc: "conc".to_string(),
        link: Link::Logit,
        rhs: "log1p(`conc`) + `strain`".to_string(),
        factor1: Some(Factor {
            name: "strain".to_string(),
            baseline: Some("WT".to_string()),
        }),
        factor2: None,
        share_pairs: false,
    };
    let mut ctx = Ctx::new(
        input.clone(),
        tmp.path().join("out"),
        params,
        false,
        false,
        true,
        "0.0.0-test",
    );
    ctx.data = Some(load_csv(&input).unwrap());
    ctx.transform = Some(Transform::Log1p);

    let raw: ordmic::engine::RawAnalysisResult = serde_json::from_value(serde_json::json!({
        "mic_estimates": [{"strain": "WT", "mic": 1.5, "lower_ci": 0.5, "upper_ci": 2.5}],
        "df_used_csv": "score,conc,strain\n0,0,WT\n",
        "session_info": "R version 4.4.0"
    }))
    .unwrap();
    let tables = normalize(&raw);
    let available_plots = AnalysisRun::derive_available_plots(&tables);
    ctx.publish_run(AnalysisRun {
        tables,
        available_plots,
        df_used_csv: raw.df_used_csv.clone().unwrap(),
        session_info: raw.session_info.clone().unwrap(),
        proportional_test: String::new(),
    });
    ctx.plot_cache.insert(
        PlotKind::Mic,
        "<svg width=\"9in\" height=\"5.2in\">a mic plot, long enough</svg>".to_string(),
    );
    ctx
}

fn entry_names(path: &std::path::Path) -> Vec<String> {
    let file = fs::File::open(path).unwrap();
    let archive = zip::ZipArchive::new(file).unwrap();
    archive.file_names().map(|n| n.to_string()).collect()
}

#[test]
fn bundle_contains_expected_entries() {
    let tmp = TempDir::new().unwrap();
    let ctx = make_ctx(&tmp);
    let path = tmp.path().join("results.zip");
    write_bundle(&path, &ctx).unwrap();

    let mut names = entry_names(&path);
    names.sort();
    for expected in [
        "README.txt",
        "analysis.Rmd",
        "data/analysis_data.csv",
        "data/raw_input.csv",
        "reproduce.R",
        "results/plot_mic.svg",
        "results/tables/Coefficients.csv",
        "results/tables/DeltaMIC.csv",
        "results/tables/DoD_Delta.csv",
        "results/tables/DoD_Ratio.csv",
        "results/tables/MIC.csv",
        "results/tables/RatioMIC.csv",
        "results/tables/Thresholds.csv",
        "sessionInfo.txt",
    ] {
        assert!(names.iter().any(|n| n == expected), "{} missing", expected);
    }
}

#[test]
fn analysis_data_is_engine_exact_copy() {
    let tmp = TempDir::new().unwrap();
    let ctx = make_ctx(&tmp);
    let path = tmp.path().join("results.zip");
    write_bundle(&path, &ctx).unwrap();

    let file = fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name("data/analysis_data.csv").unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    assert_eq!(content, "score,conc,strain\n0,0,WT\n");
}

#[test]
fn empty_sheets_are_marked() {
    let tmp = TempDir::new().unwrap();
    let ctx = make_ctx(&tmp);
    let path = tmp.path().join("results.zip");
    write_bundle(&path, &ctx).unwrap();

    let file = fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name("results/tables/DoD_Ratio.csv").unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    assert_eq!(content, "(no data)\n");
}

#[test]
fn plot_svg_is_sanitized() {
    let tmp = TempDir::new().unwrap();
    let ctx = make_ctx(&tmp);
    let path = tmp.path().join("results.zip");
    write_bundle(&path, &ctx).unwrap();

    let file = fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut entry = archive.by_name("results/plot_mic.svg").unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    assert!(content.starts_with("<?xml"));
    assert!(content.contains("xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(content.contains("viewBox=\"0 0 864 499\""));
}
