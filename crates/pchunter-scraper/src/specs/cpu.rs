use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{first_match, Rule};

// Intel has no leading word boundary: sellers write "corei5" as often as "core i5".
static INTEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(i[3579])(?:-?\s*([0-9]{4,5}[a-z0-9]{0,3}|\b[0-9]{1,2}(?:th|eme|ere)\b(?:\s*gen)?|\b[0-9]{1,2}\b\s*gen))?",
    )
    .expect("valid regex")
});
static RYZEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bryzen\s*([3579])(?:-?\s*([0-9]{4}[a-z0-9]{0,3}|\b[0-9]{1,2}(?:th|eme|ere)\b(?:\s*gen)?|\b[0-9]{1,2}\b\s*gen))?",
    )
    .expect("valid regex")
});
static APPLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bm([1-4])(?:\s*(pro|max))?\b").expect("valid regex"));
static GENERATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})(?:th|eme|ere|\s*gen|$)").expect("valid regex")
});

// "m2" also names an SSD form factor, so Apple silicon is only considered
// once no Intel or AMD model is present.
static CPU_RULES: &[Rule] = &[
    Rule {
        name: "intel",
        pattern: &INTEL_RE,
        render: render_intel,
    },
    Rule {
        name: "ryzen",
        pattern: &RYZEN_RE,
        render: render_ryzen,
    },
    Rule {
        name: "apple_silicon",
        pattern: &APPLE_RE,
        render: render_apple,
    },
];

/// What follows the CPU family token.
#[derive(Debug, PartialEq, Eq)]
enum CpuSuffix {
    /// `"12th gen"`, `"10eme"`, `"5 gen"` → 12, 10, 5.
    Generation(String),
    /// Model number with letters, upper-cased and whitespace-free: `"1145G7"`.
    Model(String),
}

impl CpuSuffix {
    fn parse(raw: &str) -> Self {
        match GENERATION_RE.captures(raw).and_then(|caps| caps.get(1)) {
            Some(number) => CpuSuffix::Generation(number.as_str().to_string()),
            None => CpuSuffix::Model(
                raw.chars()
                    .filter(|c| !c.is_whitespace())
                    .collect::<String>()
                    .to_uppercase(),
            ),
        }
    }
}

pub(super) fn extract_cpu(q: &str) -> Option<String> {
    first_match(CPU_RULES, q)
}

fn render_intel(caps: &Captures<'_>) -> Option<String> {
    let family = caps.get(1)?.as_str().to_uppercase();
    Some(match caps.get(2).map(|m| CpuSuffix::parse(m.as_str())) {
        None => family,
        Some(CpuSuffix::Generation(n)) => format!("{family} {n}th Gen"),
        Some(CpuSuffix::Model(model)) => format!("{family}{model}"),
    })
}

fn render_ryzen(caps: &Captures<'_>) -> Option<String> {
    let tier = caps.get(1)?.as_str();
    Some(match caps.get(2).map(|m| CpuSuffix::parse(m.as_str())) {
        None => format!("Ryzen {tier}"),
        Some(CpuSuffix::Generation(n)) => format!("Ryzen {tier} {n}th Gen"),
        Some(CpuSuffix::Model(model)) => format!("Ryzen {tier} {model}"),
    })
}

fn render_apple(caps: &Captures<'_>) -> Option<String> {
    let chip = caps.get(1)?.as_str();
    Some(match caps.get(2).map(|m| m.as_str()) {
        Some("pro") => format!("M{chip} Pro"),
        Some("max") => format!("M{chip} Max"),
        _ => format!("M{chip}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_generation_forms() {
        assert_eq!(
            CpuSuffix::parse("12th gen"),
            CpuSuffix::Generation("12".into())
        );
        assert_eq!(CpuSuffix::parse("10eme"), CpuSuffix::Generation("10".into()));
        assert_eq!(CpuSuffix::parse("5 gen"), CpuSuffix::Generation("5".into()));
    }

    #[test]
    fn suffix_model_is_uppercased() {
        assert_eq!(CpuSuffix::parse("1145g7"), CpuSuffix::Model("1145G7".into()));
        assert_eq!(CpuSuffix::parse("5600h"), CpuSuffix::Model("5600H".into()));
    }

    #[test]
    fn intel_without_suffix_is_family_only() {
        assert_eq!(extract_cpu("dell i7 16gb").as_deref(), Some("I7"));
    }

    #[test]
    fn intel_wins_over_m2_ssd() {
        assert_eq!(
            extract_cpu("i5-1235u ssd m2 512").as_deref(),
            Some("I51235U")
        );
    }
}
