//! Text of the reproduction scripts shipped in the export bundle.
//!
//! The generated R Markdown repeats the exact model settings of the run:
//! same formula, same link, same factor releveling, and the same
//! transform/inverse pair the solver was called with, so rendering it
//! reproduces the in-app tables.

use crate::model::AnalysisParams;
use crate::model::transform::Transform;

pub const ANALYSIS_DATA_REL: &str = "data/analysis_data.csv";
pub const TABLES_REL: &str = "results/tables.xlsx";

pub fn build_rmd_text(params: &AnalysisParams, transform: Transform) -> String {
    let mut factor_lines: Vec<String> = Vec::new();
    for factor in params.factors() {
        let line = match &factor.baseline {
            Some(baseline) => format!(
                "if (\"{name}\" %in% names(df)) df[['{name}']] <- stats::relevel(as.factor(df[['{name}']]), ref='{baseline}')",
                name = factor.name,
                baseline = baseline
            ),
            None => format!(
                "if (\"{name}\" %in% names(df)) df[['{name}']] <- as.factor(df[['{name}']])",
                name = factor.name
            ),
        };
        factor_lines.push(line);
    }
    let factor_block = factor_lines.join("\n");

    let formula = serde_json::to_string(&format!("`{}` ~ {}", params.score, params.rhs))
        .expect("string serialization cannot fail");
    let compare_arg = if params.share_pairs {
        ", compare_pairs = 'share_any'"
    } else {
        ""
    };

    format!(
        r#"---
title: "Ordinal MIC Analysis"
output: html_document
editor_options:
  chunk_output_type: console
---

> This report was auto-generated. It uses the exact cleaned data and model settings.

## Setup

```r
pkgs <- c("ordinalMIC","ordinal","ggplot2","readr","dplyr","tibble")
to_install <- setdiff(pkgs, rownames(installed.packages()))
if (length(to_install)) install.packages(to_install)
invisible(lapply(pkgs, library, character.only = TRUE))
```

## Data (exact data used by the model)

```r
df <- readr::read_csv("{data_file}", show_col_types = FALSE)
str(df)
```

## Model

```r
{factor_block}

# Ordinal DV and numeric concentration
df[['{score}']] <- ordered(df[['{score}']])
df[['{conc}']]  <- suppressWarnings(readr::parse_number(as.character(df[['{conc}']])))

form <- as.formula({formula})
fit <- ordinal::clm(form, data = df, link = "{link}", Hess = TRUE)
summary(fit)
```

## MIC Analysis

```r
tf  <- {tf}
inv <- {inv}
mic <- ordinalMIC::mic_solve(
  fit,
  conc_name = "{conc}",
  transform_fun = tf,
  inv_transform_fun = inv{compare_arg}
)

mic_est   <- tibble::as_tibble(if (!is.null(mic$mic_estimates)) mic$mic_estimates else tibble::tibble())
ratio_out <- tibble::as_tibble(if (!is.null(mic$ratio_mic_results)) mic$ratio_mic_results else tibble::tibble())
delta_out <- tibble::as_tibble(if (!is.null(mic$delta_mic_results)) mic$delta_mic_results else tibble::tibble())
dodR_out  <- tibble::as_tibble(if (!is.null(mic$dod_ratio_results)) mic$dod_ratio_results else tibble::tibble())
dodD_out  <- tibble::as_tibble(if (!is.null(mic$dod_delta_results)) mic$dod_delta_results else tibble::tibble())

mic_est
ratio_out
delta_out
dodR_out
dodD_out
```

## Plots

```r
library(ggplot2)
autoplot(mic, type="mic")
if (nrow(ratio_out)>0) autoplot(mic, type="ratio")
if (nrow(delta_out)>0) autoplot(mic, type="delta")
if (nrow(dodR_out )>0) autoplot(mic, type="DoD_ratio")
if (nrow(dodD_out )>0) autoplot(mic, type="DoD_delta")
```

## Export tables (optional)

```r
# Write a single Excel if 'writexl' is available, else CSVs.
if (requireNamespace("writexl", quietly = TRUE)) {{
  dir.create("results", showWarnings = FALSE)
  writexl::write_xlsx(list(
    MIC        = mic_est,
    DeltaMIC   = delta_out,
    RatioMIC   = ratio_out,
    DoD_Ratio  = dodR_out,
    DoD_Delta  = dodD_out
  ), path = "{excel_file}")
}} else {{
  dir.create("results", showWarnings = FALSE)
  readr::write_csv(mic_est,  "results/MIC.csv")
  readr::write_csv(delta_out,"results/DeltaMIC.csv")
  readr::write_csv(ratio_out,"results/RatioMIC.csv")
  readr::write_csv(dodR_out, "results/DoD_Ratio.csv")
  readr::write_csv(dodD_out, "results/DoD_Delta.csv")
}}
```

## Diagnostics

```r
ordinal::nominal_test(fit)
sessionInfo()
```
"#,
        data_file = ANALYSIS_DATA_REL,
        factor_block = factor_block,
        score = params.score,
        conc = params.conc,
        formula = formula,
        link = params.link.as_str(),
        tf = transform.r_forward(),
        inv = transform.r_inverse(),
        compare_arg = compare_arg,
        excel_file = TABLES_REL,
    )
}

pub fn build_readme_text() -> String {
    "Reproducible bundle

Contents
--------
- data/raw_input.csv          : the dataset you uploaded (cleaned of empty rows)
- data/analysis_data.csv      : the exact data used by the model in R
- results/tables/             : MIC, DeltaMIC, RatioMIC, DoD_Ratio, DoD_Delta, Coefficients, Thresholds as CSV
- analysis.Rmd                : R Markdown that reproduces model, plots and tables
- reproduce.R                 : convenience script to render the Rmd

How to run
----------
1) Open R (or RStudio) in this folder.
2) Run:

   source(\"reproduce.R\")

This will install any missing packages and render analysis.Rmd to HTML.

Notes
-----
- analysis_data.csv matches the analysis after NA removal and factor releveling.
- If writexl is not installed, analysis.Rmd will write CSVs instead of an XLSX.
"
    .to_string()
}

pub fn build_reproduce_r() -> String {
    "pkgs <- c(\"ordinalMIC\",\"ordinal\",\"ggplot2\",\"readr\",\"dplyr\",\"tibble\",\"rmarkdown\")
to_install <- setdiff(pkgs, rownames(installed.packages()))
if (length(to_install)) install.packages(to_install)
rmarkdown::render(\"analysis.Rmd\", output_format = \"html_document\")"
        .to_string()
}
