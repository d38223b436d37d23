//! Concentration transform detection.
//!
//! The model formula may wrap the concentration column in a monotonic
//! transform; the MIC solver needs both the transform and its exact
//! inverse. Detection is textual and must check the more specific names
//! first: a bare `log(` check would otherwise shadow `log10(`/`log1p(`.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Identity,
    Log,
    Log10,
    Log1p,
    Sqrt,
}

impl Transform {
    /// Detect the transform applied to `conc_name` in the formula RHS.
    /// Matches the wrapper around either the backticked or the bare column
    /// name, whitespace- and case-insensitively. No match means identity.
    pub fn resolve(rhs: &str, conc_name: &str) -> Self {
        let rhs_n = normalize(rhs);
        let delimited = normalize(&format!("`{}`", conc_name));
        let bare = normalize(conc_name);
        let has = |func: &str| {
            rhs_n.contains(&format!("{}({})", func, delimited))
                || rhs_n.contains(&format!("{}({})", func, bare))
        };

        if has("log1p") {
            Transform::Log1p
        } else if has("log10") {
            Transform::Log10
        } else if has("log") {
            Transform::Log
        } else if has("sqrt") {
            Transform::Sqrt
        } else {
            Transform::Identity
        }
    }

    pub fn forward(&self, x: f64) -> f64 {
        match self {
            Transform::Identity => x,
            Transform::Log => x.ln(),
            Transform::Log10 => x.log10(),
            Transform::Log1p => x.ln_1p(),
            Transform::Sqrt => x.sqrt(),
        }
    }

    pub fn inverse(&self, y: f64) -> f64 {
        match self {
            Transform::Identity => y,
            Transform::Log => y.exp(),
            Transform::Log10 => 10f64.powf(y),
            Transform::Log1p => y.exp_m1(),
            Transform::Sqrt => y * y,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Transform::Identity => "identity",
            Transform::Log => "log",
            Transform::Log10 => "log10",
            Transform::Log1p => "log1p",
            Transform::Sqrt => "sqrt",
        }
    }

    /// R source for the forward function, as passed to the MIC solver and
    /// into the generated reproduction script.
    pub fn r_forward(&self) -> &'static str {
        match self {
            Transform::Identity => "function(x) x",
            Transform::Log => "function(x) log(x)",
            Transform::Log10 => "function(x) log10(x)",
            Transform::Log1p => "function(x) log1p(x)",
            Transform::Sqrt => "function(x) sqrt(x)",
        }
    }

    /// R source for the inverse function.
    pub fn r_inverse(&self) -> &'static str {
        match self {
            Transform::Identity => "function(y) y",
            Transform::Log => "function(y) exp(y)",
            Transform::Log10 => "function(y) 10^y",
            Transform::Log1p => "function(y) expm1(y)",
            Transform::Sqrt => "function(y) y^2",
        }
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}
