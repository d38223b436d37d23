use serde::{Deserialize, Serialize};

pub mod transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    Logit,
    Probit,
    Cloglog,
    Loglog,
    Cauchit,
}

impl Link {
    pub fn as_str(&self) -> &'static str {
        match self {
            Link::Logit => "logit",
            Link::Probit => "probit",
            Link::Cloglog => "cloglog",
            Link::Loglog => "loglog",
            Link::Cauchit => "cauchit",
        }
    }
}

/// One factor selection: column name plus optional baseline (reference)
/// level applied via releveling before the fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub baseline: Option<String>,
}

/// Everything the user configures for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisParams {
    pub score: String,
    pub conc: String,
    pub link: Link,
    pub rhs: String,
    pub factor1: Option<Factor>,
    pub factor2: Option<Factor>,
    pub share_pairs: bool,
}

impl AnalysisParams {
    pub fn factors(&self) -> Vec<&Factor> {
        self.factor1.iter().chain(self.factor2.iter()).collect()
    }
}

/// Default formula RHS from the selected columns, mirroring what a user
/// would write by hand: `log1p(\`conc\`) + \`fac1\` * \`fac2\``.
pub fn default_rhs(conc: &str, factor1: Option<&str>, factor2: Option<&str>) -> String {
    let mut factor_parts: Vec<String> = Vec::new();
    if let Some(f) = factor1 {
        factor_parts.push(format!("`{}`", f));
    }
    if let Some(f) = factor2 {
        factor_parts.push(format!("`{}`", f));
    }
    let factor_part = factor_parts.join(" * ");
    let conc_part = format!("log1p(`{}`)", conc);
    if factor_part.is_empty() {
        conc_part
    } else {
        format!("{} + {}", conc_part, factor_part)
    }
}

/// Order factor levels the way a human reads them: numerically when both
/// sides parse as numbers, lexically otherwise.
pub fn sort_levels(levels: &mut [String]) {
    levels.sort_by(|a, b| match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        _ => a.cmp(b),
    });
}
