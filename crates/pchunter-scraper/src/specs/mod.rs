//! Free text → [`ParsedSpec`].
//!
//! Each attribute is extracted by an ordered list of [`Rule`]s evaluated
//! first-match-wins over the lowercased input. Extraction never fails: a
//! field that no rule recognises is simply left absent.
//!
//! See the sibling modules for the rule sets:
//! - [`cpu`]: Intel, AMD Ryzen and Apple silicon models
//! - [`gpu`]: NVIDIA model numbers and integrated-graphics family labels
//! - [`memory`]: RAM vs storage disambiguation
//! - [`device`]: condition, category and category-specific metadata

mod cpu;
mod device;
mod gpu;
mod memory;

use std::sync::LazyLock;

use pchunter_core::ParsedSpec;
use regex::{Captures, Regex};

/// One named pattern and the function that renders its canonical value.
///
/// `render` may reject a match (returning `None`), in which case the next
/// rule is tried.
pub(crate) struct Rule {
    name: &'static str,
    pattern: &'static LazyLock<Regex>,
    render: fn(&Captures<'_>) -> Option<String>,
}

impl Rule {
    fn apply(&self, text: &str) -> Option<String> {
        let caps = self.pattern.captures(text)?;
        (self.render)(&caps)
    }
}

/// Returns the rendered value of the first rule that matches `text`.
fn first_match(rules: &[Rule], text: &str) -> Option<String> {
    rules.iter().find_map(|rule| {
        let value = rule.apply(text)?;
        tracing::trace!(rule = rule.name, value = %value, "spec rule matched");
        Some(value)
    })
}

/// Extracts structured hardware attributes from a query or listing title.
///
/// ```
/// use pchunter_core::Condition;
/// use pchunter_scraper::parse_specs;
///
/// let spec = parse_specs("i5-1145G7 Iris Xe 16GB 512gb new");
/// assert_eq!(spec.cpu.as_deref(), Some("I51145G7"));
/// assert_eq!(spec.gpu.as_deref(), Some("Iris Xe"));
/// assert_eq!(spec.ram.as_deref(), Some("16GB"));
/// assert_eq!(spec.storage.as_deref(), Some("512GB"));
/// assert_eq!(spec.condition, Some(Condition::New));
/// ```
#[must_use]
pub fn parse_specs(text: &str) -> ParsedSpec {
    let q = text.to_lowercase();
    if q.trim().is_empty() {
        return ParsedSpec::default();
    }

    let mut spec = ParsedSpec {
        cpu: cpu::extract_cpu(&q),
        gpu: gpu::extract_gpu(&q),
        ram: memory::extract_ram(&q),
        storage: memory::extract_storage(&q),
        condition: device::extract_condition(&q),
        ..ParsedSpec::default()
    };
    device::apply_device_rules(&q, &mut spec);

    tracing::debug!(
        text,
        category = ?spec.category,
        cpu = ?spec.cpu,
        gpu = ?spec.gpu,
        ram = ?spec.ram,
        storage = ?spec.storage,
        "parsed specs"
    );
    spec
}

#[cfg(test)]
#[path = "specs_test.rs"]
mod tests;
