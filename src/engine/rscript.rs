//! Rscript subprocess engine.
//!
//! The cleaned dataset is handed to R through a temp CSV; the generated
//! program relevel-s factors, fits `ordinal::clm`, runs
//! `ordinalMIC::mic_solve` with the resolved transform pair, and prints a
//! single JSON document on stdout. NA cleaning happens engine-side so the
//! returned `df_used_csv` is the exact data the model saw.

use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::debug;

use crate::engine::{EngineRequest, MicEngine, RawAnalysisResult};
use crate::model::Factor;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct RscriptEngine {
    rscript: PathBuf,
}

impl RscriptEngine {
    pub fn new(rscript: Option<PathBuf>) -> Self {
        Self {
            rscript: rscript.unwrap_or_else(|| PathBuf::from("Rscript")),
        }
    }
}

impl MicEngine for RscriptEngine {
    fn name(&self) -> &'static str {
        "rscript"
    }

    fn solve(&self, req: &EngineRequest, data: &Table) -> Result<RawAnalysisResult> {
        let dir = tempfile::tempdir().context("failed to create engine temp dir")?;
        let data_path = dir.path().join("input.csv");
        write_csv(&data_path, data)?;

        let program = build_program(req, &data_path.display().to_string());
        let script_path = dir.path().join("solve.R");
        std::fs::write(&script_path, &program)
            .with_context(|| format!("failed to write {}", script_path.display()))?;
        debug!(script = %script_path.display(), "engine program written");

        let output = Command::new(&self.rscript)
            .arg("--vanilla")
            .arg(&script_path)
            .output()
            .with_context(|| format!("failed to launch {}", self.rscript.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("engine exited with {}: {}", output.status, stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let json = stdout
            .lines()
            .rev()
            .find(|l| l.trim_start().starts_with('{'))
            .context("engine produced no JSON result")?;
        let result: RawAnalysisResult =
            serde_json::from_str(json).context("malformed engine JSON result")?;
        if let Some(err) = &result.error {
            bail!("{}", err);
        }
        Ok(result)
    }
}

fn write_csv(path: &std::path::Path, data: &Table) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut w = csv::Writer::from_writer(std::io::BufWriter::new(file));
    w.write_record(data.columns())?;
    for row in data.rows() {
        w.write_record(row.iter().map(|v| v.render()))?;
    }
    w.flush()?;
    Ok(())
}

/// R string literal with the same escaping rules as JSON.
fn r_string(s: &str) -> String {
    serde_json::to_string(s).expect("string serialization cannot fail")
}

fn factor_entry(factor: Option<&Factor>) -> String {
    match factor {
        Some(f) => format!(
            "list(name = {}, baseline = {})",
            r_string(&f.name),
            f.baseline
                .as_deref()
                .map(r_string)
                .unwrap_or_else(|| "NULL".to_string())
        ),
        None => "list(name = NULL, baseline = NULL)".to_string(),
    }
}

pub fn build_program(req: &EngineRequest, data_path: &str) -> String {
    let formula = format!("`{}` ~ {}", req.score, req.rhs);
    let compare_arg = if req.share_pairs {
        ", compare_pairs = 'share_any'"
    } else {
        ""
    };
    let plot_block = if req.want_plots {
        PLOT_BLOCK
    } else {
        "plots <- NULL\n"
    };

    format!(
        r#"suppressMessages({{
  library(ordinalMIC); library(ordinal); library(jsonlite); library(readr); library(tibble)
}})

emit_error <- function(msg) {{
  cat(jsonlite::toJSON(list(error = msg), auto_unbox = TRUE))
  quit(save = "no", status = 0)
}}

tryCatch({{
  df <- readr::read_csv({data_path}, show_col_types = FALSE)

  factor_info <- list(
    {factor1},
    {factor2}
  )
  for (info in factor_info) {{
    col_name <- info$name
    baseline <- info$baseline
    if (!is.null(col_name) && col_name %in% names(df)) {{
      df[[col_name]] <- as.factor(df[[col_name]])
      ref_level <- if (!is.null(baseline) && baseline %in% levels(df[[col_name]])) baseline else levels(df[[col_name]])[1]
      df[[col_name]] <- stats::relevel(df[[col_name]], ref = ref_level)
    }}
  }}

  df <- stats::na.omit(df)
  if (nrow(df) == 0) stop("All data was removed after cleaning missing values.")

  df[[{score}]] <- ordered(df[[{score}]])
  df[[{conc}]] <- suppressWarnings(readr::parse_number(as.character(df[[{conc}]])))

  df_used_csv <- readr::format_csv(df)
  session_info <- paste(capture.output(utils::sessionInfo()), collapse = "\n")

  model <- ordinal::clm(stats::as.formula({formula}), data = df, link = {link}, Hess = TRUE)
  mic_analysis <- ordinalMIC::mic_solve(
    model,
    conc_name = {conc},
    transform_fun = {tf},
    inv_transform_fun = {inv}{compare_arg}
  )

  to_tbl <- function(x) if (is.null(x)) tibble::tibble() else tibble::as_tibble(x)
  mic_df <- to_tbl(mic_analysis$mic_estimates)
  ratio_df <- to_tbl(mic_analysis$ratio_mic_results)
  delta_df <- to_tbl(mic_analysis$delta_mic_results)
  dod_ratio_df <- to_tbl(mic_analysis$dod_ratio_results)
  dod_delta_df <- to_tbl(mic_analysis$dod_delta_results)

  coef_df <- tibble::rownames_to_column(as.data.frame(summary(model)$coefficients), "Term")

  available <- list(
    mic = TRUE,
    ratio = nrow(ratio_df) > 0,
    delta = nrow(delta_df) > 0,
    dod_ratio = nrow(dod_ratio_df) > 0,
    dod_delta = nrow(dod_delta_df) > 0
  )

  {plot_block}
  cat(jsonlite::toJSON(list(
    mic_estimates = mic_df,
    ratio_mic_results = ratio_df,
    delta_mic_results = delta_df,
    dod_ratio_results = dod_ratio_df,
    dod_delta_results = dod_delta_df,
    coefficients = coef_df,
    available_plots = available,
    plots = plots,
    df_used_csv = df_used_csv,
    session_info = session_info,
    proportional_test = tryCatch(
      paste(capture.output(suppressMessages(ordinal::nominal_test(model))), collapse = "\n"),
      error = function(e) paste("Nominal test failed:", e$message)
    )
  ), dataframe = "rows", auto_unbox = TRUE, na = "null"))
}}, error = function(e) emit_error(conditionMessage(e)))
"#,
        data_path = r_string(data_path),
        factor1 = factor_entry(req.factor1.as_ref()),
        factor2 = factor_entry(req.factor2.as_ref()),
        score = r_string(&req.score),
        conc = r_string(&req.conc),
        formula = r_string(&formula),
        link = r_string(req.link.as_str()),
        tf = req.transform.r_forward(),
        inv = req.transform.r_inverse(),
        compare_arg = compare_arg,
        plot_block = plot_block,
    )
}

const PLOT_BLOCK: &str = r#"plots <- list()
  suppressMessages({ library(ggplot2); library(svglite) })
  for (type in c("mic", "ratio", "delta", "dod_ratio", "dod_delta")) {
    if (!isTRUE(available[[type]])) next
    p <- tryCatch(switch(type,
      "mic" = autoplot(mic_analysis, type = "mic"),
      "ratio" = autoplot(mic_analysis, type = "ratio"),
      "delta" = autoplot(mic_analysis, type = "delta"),
      "dod_ratio" = autoplot(mic_analysis, type = "DoD_ratio"),
      "dod_delta" = autoplot(mic_analysis, type = "DoD_delta")
    ), error = function(e) NULL)
    if (is.null(p)) next
    p <- p + ggplot2::theme_minimal(base_size = 16) +
      ggplot2::theme(plot.title = ggplot2::element_text(face = "bold"), legend.position = "bottom")
    svg <- tryCatch(as.character(
      svglite::stringSVG(code = print(p), width = 9, height = 5.2, pointsize = 12, standalone = TRUE)
    ), error = function(e) NA_character_)
    if (!is.na(svg)) plots[[type]] <- svg
  }
  if (length(plots) == 0) plots <- NULL
"#;
