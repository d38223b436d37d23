//! Plot bookkeeping: kinds, availability flags, and the per-run SVG cache.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlotKind {
    Mic,
    Ratio,
    Delta,
    DodRatio,
    DodDelta,
}

/// Preference order for the default plot.
pub const PLOT_KINDS: [PlotKind; 5] = [
    PlotKind::Mic,
    PlotKind::Ratio,
    PlotKind::Delta,
    PlotKind::DodRatio,
    PlotKind::DodDelta,
];

impl PlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlotKind::Mic => "mic",
            PlotKind::Ratio => "ratio",
            PlotKind::Delta => "delta",
            PlotKind::DodRatio => "dod_ratio",
            PlotKind::DodDelta => "dod_delta",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AvailablePlots {
    #[serde(default)]
    pub mic: bool,
    #[serde(default)]
    pub ratio: bool,
    #[serde(default)]
    pub delta: bool,
    #[serde(default)]
    pub dod_ratio: bool,
    #[serde(default)]
    pub dod_delta: bool,
}

impl AvailablePlots {
    pub fn is_available(&self, kind: PlotKind) -> bool {
        match kind {
            PlotKind::Mic => self.mic,
            PlotKind::Ratio => self.ratio,
            PlotKind::Delta => self.delta,
            PlotKind::DodRatio => self.dod_ratio,
            PlotKind::DodDelta => self.dod_delta,
        }
    }

    /// First available kind in preference order.
    pub fn preferred(&self) -> Option<PlotKind> {
        PLOT_KINDS.into_iter().find(|k| self.is_available(*k))
    }
}

/// Lazily-populated plot SVG cache. Each kind is rendered at most once per
/// analysis run; a new run resets the cache wholesale, never per entry.
#[derive(Debug, Default)]
pub struct PlotCache {
    entries: HashMap<PlotKind, String>,
}

impl PlotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: PlotKind) -> Option<&str> {
        self.entries.get(&kind).map(|s| s.as_str())
    }

    /// Store a rendered SVG unless the kind is already cached.
    pub fn insert(&mut self, kind: PlotKind, svg: String) {
        self.entries.entry(kind).or_insert(svg);
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Make an engine SVG safe as a standalone file: XML prolog, svg xmlns,
/// and a viewBox recovered from inch dimensions when absent.
pub fn sanitize_svg(svg: &str) -> String {
    let mut s = svg.trim().to_string();

    if !s.starts_with("<?xml") {
        s = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", s);
    }
    if let Some(tag_start) = s.find("<svg") {
        let tag_end = s[tag_start..].find('>').map(|i| tag_start + i);
        let tag = tag_end.map(|end| &s[tag_start..end]).unwrap_or("");
        let needs_xmlns = !tag.contains("xmlns=");
        let needs_viewbox = !tag.contains("viewBox=");
        let viewbox = if needs_viewbox {
            inch_viewbox(tag)
        } else {
            None
        };
        let mut insert = String::new();
        if needs_xmlns {
            insert.push_str(" xmlns=\"http://www.w3.org/2000/svg\"");
        }
        if let Some((w, h)) = viewbox {
            insert.push_str(&format!(" viewBox=\"0 0 {} {}\"", w, h));
        }
        if !insert.is_empty() {
            s.insert_str(tag_start + 4, &insert);
        }
    }
    s
}

/// 96 px per inch, matching how browsers rasterize svglite output.
fn inch_viewbox(tag: &str) -> Option<(i64, i64)> {
    let w = attr_inches(tag, "width=\"")?;
    let h = attr_inches(tag, "height=\"")?;
    Some(((w * 96.0).round() as i64, (h * 96.0).round() as i64))
}

fn attr_inches(tag: &str, prefix: &str) -> Option<f64> {
    let start = tag.find(prefix)? + prefix.len();
    let rest = &tag[start..];
    let end = rest.find('"')?;
    let value = &rest[..end];
    value.strip_suffix("in")?.parse::<f64>().ok()
}
