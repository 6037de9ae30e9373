//! Condition, device category, and category-specific metadata.

use std::sync::LazyLock;

use pchunter_core::{Category, Condition, ParsedSpec, BATTERY_HEALTH_KEY, MILEAGE_KEY};
use regex::Regex;

// French and Darija terms sit next to the English ones.
static NEW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:new|neuf|neuve|cachet[eé])\b").expect("valid regex")
});
static USED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:used|occasion|cabah)\b").expect("valid regex"));

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\biphone\s*(\d{1,2})(?:\s*(pro\s*max|pro|max|plus|mini))?\b")
        .expect("valid regex")
});
static BATTERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:battery|batterie|bat|[ée]tat|health)\s*:?\s*(\d{2,3})\s*%")
        .expect("valid regex")
});
static SCOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:trottinette|scooter|xiaomi)\b").expect("valid regex"));
static SCOOTER_MODEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bxiaomi\s*(pro\s*2|pro\s*4|essential|1s|m365)\b").expect("valid regex")
});
static MILEAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,5})\s*(?:km|kilometers|kilometres|kilometrage)\b").expect("valid regex")
});
static LAPTOP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:laptop|portable|notebook|macbook)\b").expect("valid regex")
});

/// A category rule: when `pattern` matches, `apply` sets the category and any
/// category-specific fields.
struct DeviceRule {
    name: &'static str,
    pattern: &'static LazyLock<Regex>,
    apply: fn(&str, &mut ParsedSpec),
}

// Scooter keywords win over phone models; "xiaomi" names both product lines
// and the scooters are what gets listed under it locally.
static DEVICE_RULES: &[DeviceRule] = &[
    DeviceRule {
        name: "scooter",
        pattern: &SCOOTER_RE,
        apply: apply_scooter,
    },
    DeviceRule {
        name: "phone",
        pattern: &PHONE_RE,
        apply: apply_phone,
    },
    DeviceRule {
        name: "laptop",
        pattern: &LAPTOP_RE,
        apply: apply_laptop,
    },
];

/// New is checked before used.
pub(super) fn extract_condition(q: &str) -> Option<Condition> {
    if NEW_RE.is_match(q) {
        Some(Condition::New)
    } else if USED_RE.is_match(q) {
        Some(Condition::Used)
    } else {
        None
    }
}

pub(super) fn apply_device_rules(q: &str, spec: &mut ParsedSpec) {
    if let Some(rule) = DEVICE_RULES.iter().find(|rule| rule.pattern.is_match(q)) {
        tracing::trace!(rule = rule.name, "device rule matched");
        (rule.apply)(q, spec);
    }

    if let Some(health) = battery_health(q) {
        spec.metadata
            .insert(BATTERY_HEALTH_KEY.to_string(), health.to_string());
    }
}

fn apply_scooter(q: &str, spec: &mut ParsedSpec) {
    spec.category = Some(Category::Scooter);

    if let Some(model) = SCOOTER_MODEL_RE.captures(q).and_then(|caps| caps.get(1)) {
        spec.cpu = Some(format!("Xiaomi {}", capitalize(&collapse_whitespace(model.as_str()))));
    }
    if let Some(km) = MILEAGE_RE.captures(q).and_then(|caps| caps.get(1)) {
        spec.metadata
            .insert(MILEAGE_KEY.to_string(), km.as_str().to_string());
    }
}

fn apply_phone(q: &str, spec: &mut ParsedSpec) {
    spec.category = Some(Category::Phone);

    let Some(caps) = PHONE_RE.captures(q) else {
        return;
    };
    let Some(generation) = caps.get(1) else {
        return;
    };
    let mut model = format!("iPhone {}", generation.as_str());
    if let Some(variant) = caps.get(2) {
        for word in variant.as_str().split_whitespace() {
            model.push(' ');
            model.push_str(&capitalize(word));
        }
    }
    spec.cpu = Some(model);
}

fn apply_laptop(_: &str, spec: &mut ParsedSpec) {
    spec.category = Some(Category::Laptop);
}

/// Battery health percentage, only when it is a valid percentage.
fn battery_health(q: &str) -> Option<u8> {
    let caps = BATTERY_RE.captures(q)?;
    let value = caps.get(1)?.as_str().parse::<u8>().ok()?;
    (value <= 100).then_some(value)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
