use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{first_match, Rule};

static RTX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\brtx\s*([2-5]0[5-9]0)\s*(ti|super|m)?\b").expect("valid regex")
});
static GTX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bgtx\s*(1[06][5-8]0)\s*(ti|super|m)?\b").expect("valid regex")
});
static RADEON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bradeon\b").expect("valid regex"));
static IRIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:iris|xe)\b").expect("valid regex"));
static UHD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\buhd\b").expect("valid regex"));

// Discrete model numbers first; family labels only describe integrated graphics.
static GPU_RULES: &[Rule] = &[
    Rule {
        name: "nvidia_rtx",
        pattern: &RTX_RE,
        render: render_rtx,
    },
    Rule {
        name: "nvidia_gtx",
        pattern: &GTX_RE,
        render: render_gtx,
    },
    Rule {
        name: "radeon",
        pattern: &RADEON_RE,
        render: render_radeon,
    },
    Rule {
        name: "iris_xe",
        pattern: &IRIS_RE,
        render: render_iris,
    },
    Rule {
        name: "uhd",
        pattern: &UHD_RE,
        render: render_uhd,
    },
];

pub(super) fn extract_gpu(q: &str) -> Option<String> {
    first_match(GPU_RULES, q)
}

fn render_rtx(caps: &Captures<'_>) -> Option<String> {
    render_nvidia("RTX", caps)
}

fn render_gtx(caps: &Captures<'_>) -> Option<String> {
    render_nvidia("GTX", caps)
}

fn render_radeon(_: &Captures<'_>) -> Option<String> {
    Some("Radeon Graphics".to_string())
}

fn render_iris(_: &Captures<'_>) -> Option<String> {
    Some("Iris Xe".to_string())
}

fn render_uhd(_: &Captures<'_>) -> Option<String> {
    Some("UHD Graphics".to_string())
}

/// `"rtx 3060 ti"` → `"RTX 3060TI"`; the variant suffix is appended unspaced.
fn render_nvidia(line: &str, caps: &Captures<'_>) -> Option<String> {
    let model = caps.get(1)?.as_str();
    let variant = caps
        .get(2)
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_default();
    Some(format!("{line} {model}{variant}"))
}
