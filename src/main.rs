use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ordmic::cli::{Cli, Commands, EngineArg, RunArgs, ValidateArgs};
use ordmic::ctx::Ctx;
use ordmic::engine::MicEngine;
use ordmic::engine::replay::ReplayEngine;
use ordmic::engine::rscript::RscriptEngine;
use ordmic::input;
use ordmic::io;
use ordmic::model::transform::Transform;
use ordmic::model::{AnalysisParams, Factor, default_rhs};
use ordmic::pipeline::Pipeline;
use ordmic::pipeline::stage0_scaffold::Stage0Scaffold;
use ordmic::pipeline::stage1_input::Stage1Input;
use ordmic::pipeline::stage2_config::Stage2Config;
use ordmic::pipeline::stage3_transform::Stage3Transform;
use ordmic::pipeline::stage4_engine::Stage4Engine;
use ordmic::pipeline::stage5_normalize::Stage5Normalize;
use ordmic::pipeline::stage6_groups::Stage6Groups;
use ordmic::pipeline::stage7_plots::Stage7Plots;
use ordmic::pipeline::stage8_output::Stage8Output;
use ordmic::pipeline::stage9_bundle::Stage9Bundle;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run_analysis(args),
        Commands::Validate(args) => validate(args),
    }
}

fn run_analysis(args: RunArgs) -> Result<()> {
    let params = AnalysisParams {
        score: args.score,
        conc: args.conc,
        link: args.link,
        rhs: args.rhs,
        factor1: make_factor(args.factor1, args.baseline1),
        factor2: make_factor(args.factor2, args.baseline2),
        share_pairs: args.share_pairs,
    };

    let engine: Box<dyn MicEngine> = match args.engine {
        EngineArg::Rscript => Box::new(RscriptEngine::new(args.rscript)),
        EngineArg::Replay => {
            let path = args
                .replay
                .context("--engine replay requires --replay <result.json>")?;
            Box::new(ReplayEngine::new(path))
        }
    };

    let mut ctx = Ctx::new(
        args.input,
        args.out,
        params,
        args.json,
        args.tsv,
        args.plots,
        env!("CARGO_PKG_VERSION"),
    );
    ctx.bundle_path = args.bundle;

    let pipeline = Pipeline::new(vec![
        Box::new(Stage0Scaffold::new()),
        Box::new(Stage1Input::new()),
        Box::new(Stage2Config::new()),
        Box::new(Stage3Transform::new()),
        Box::new(Stage4Engine::new(engine)),
        Box::new(Stage5Normalize::new()),
        Box::new(Stage6Groups::new()),
        Box::new(Stage7Plots::new()),
        Box::new(Stage8Output::new()),
        Box::new(Stage9Bundle::new()),
    ]);
    pipeline.run(&mut ctx)?;

    print_summary(&ctx)?;
    Ok(())
}

fn validate(args: ValidateArgs) -> Result<()> {
    let data = input::load_csv(&args.input)?;

    println!("ordmic validate ok");
    println!("rows: {}", data.n_rows());
    println!("columns: {}", data.columns().join(", "));

    let score = args
        .score
        .or_else(|| input::find_column(&data, "AssignedScore").map(String::from))
        .or_else(|| input::find_column(&data, "score").map(String::from));
    let conc = args
        .conc
        .or_else(|| input::find_column(&data, "concentration").map(String::from))
        .or_else(|| input::find_column(&data, "conc").map(String::from));

    if let Some(score) = &score {
        println!("score: {}", score);
    }
    if let Some(conc) = &conc {
        println!("concentration: {}", conc);
    }
    for factor in [&args.factor1, &args.factor2].into_iter().flatten() {
        let levels = input::column_levels(&data, factor);
        println!("levels of {}: {}", factor, levels.join(", "));
    }

    if let Some(conc) = &conc {
        let rhs = default_rhs(conc, args.factor1.as_deref(), args.factor2.as_deref());
        let transform = Transform::resolve(&rhs, conc);
        println!("formula rhs: {}", rhs);
        println!("transform: {}", transform.name());
    }
    Ok(())
}

fn make_factor(name: Option<String>, baseline: Option<String>) -> Option<Factor> {
    name.filter(|n| !n.is_empty())
        .map(|name| Factor { name, baseline })
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}
