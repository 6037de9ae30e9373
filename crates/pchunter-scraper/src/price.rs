//! Informal price text → whole dinars.
//!
//! Sellers write prices as `"6m"`, `"60k"`, `"6"` or `"62 000 DA"`. Spoken
//! "millions" are millions of centimes, so `1m` is 10,000 DA, and a bare one-
//! or two-digit number is read the same way (`"6"` means 60,000 DA).
//!
//! Rules are tried in order and the first one whose marker is present decides
//! the outcome. A rule that applies but cannot parse yields `None`; later
//! rules are not consulted.

use std::sync::LazyLock;

use regex::Regex;

/// One million centimes in dinars.
const CENTIME_MILLION: f64 = 10_000.0;
const THOUSAND: f64 = 1_000.0;

/// Currency tokens stripped before parsing. `dzd` must precede `da`.
const CURRENCY_TOKENS: &[&str] = &["dzd", "د.ج", "دج", "da"];

static LEADING_NUMERAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:[.,]\d+)?").expect("valid regex"));
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d(?:[\d.,\s]*\d)?").expect("valid regex"));
static MINOR_UNITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d(?:[\d.,\s]*\d)?)[.,]\d{2}$").expect("valid regex"));

struct PriceRule {
    name: &'static str,
    applies: fn(&str) -> bool,
    resolve: fn(&str) -> Option<i64>,
}

static PRICE_RULES: &[PriceRule] = &[
    PriceRule {
        name: "millions",
        applies: has_million_marker,
        resolve: resolve_millions,
    },
    PriceRule {
        name: "thousands",
        applies: has_thousand_marker,
        resolve: resolve_thousands,
    },
    PriceRule {
        name: "bare_millions",
        applies: is_short_numeral,
        resolve: resolve_short_numeral,
    },
    PriceRule {
        name: "plain",
        applies: always,
        resolve: resolve_plain,
    },
];

/// Normalizes an informal price string to whole dinars.
///
/// Returns `None` for empty or unparseable text. Never panics.
///
/// ```
/// use pchunter_scraper::normalize_price;
///
/// assert_eq!(normalize_price("6m"), Some(60_000));
/// assert_eq!(normalize_price("60k"), Some(60_000));
/// assert_eq!(normalize_price("62 000 DA"), Some(62_000));
/// assert_eq!(normalize_price("free"), None);
/// ```
#[must_use]
pub fn normalize_price(text: &str) -> Option<i64> {
    let cleaned = clean_price_text(text);
    if cleaned.is_empty() {
        return None;
    }

    let rule = PRICE_RULES.iter().find(|rule| (rule.applies)(&cleaned))?;
    let price = (rule.resolve)(&cleaned);
    tracing::trace!(text, rule = rule.name, ?price, "normalized price text");
    price
}

/// Picks the amount a buyer would actually pay out of a retail price block.
///
/// Storefronts render a struck-through regular price before the sale price
/// (`"160,000 DZD 150,000 DZD"`), so the last amount wins. A trailing
/// two-digit minor-unit group (`"150,000.00"`) is dropped.
#[must_use]
pub fn effective_price_text(text: &str) -> Option<String> {
    let amount = AMOUNT_RE.find_iter(text).last()?.as_str();
    let amount = MINOR_UNITS_RE
        .captures(amount)
        .and_then(|caps| caps.get(1))
        .map_or(amount, |m| m.as_str());
    Some(amount.to_string())
}

fn clean_price_text(text: &str) -> String {
    let mut cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    for token in CURRENCY_TOKENS {
        cleaned = cleaned.replace(token, "");
    }
    cleaned
}

fn has_million_marker(s: &str) -> bool {
    s.contains('m')
}

fn has_thousand_marker(s: &str) -> bool {
    s.contains('k')
}

fn is_short_numeral(s: &str) -> bool {
    s.len() <= 2 && s.bytes().all(|b| b.is_ascii_digit())
}

fn always(_: &str) -> bool {
    true
}

fn resolve_millions(s: &str) -> Option<i64> {
    scaled_leading_numeral(s, CENTIME_MILLION)
}

fn resolve_thousands(s: &str) -> Option<i64> {
    scaled_leading_numeral(s, THOUSAND)
}

fn resolve_short_numeral(s: &str) -> Option<i64> {
    s.parse::<i64>().ok().map(|v| v * 10_000)
}

/// Parses a plain amount, ignoring digit-group separators (`150,000`, `150.000`).
/// A trailing two-digit minor-unit group (`150000.00`) is dropped first.
fn resolve_plain(s: &str) -> Option<i64> {
    let whole = MINOR_UNITS_RE
        .captures(s)
        .and_then(|caps| caps.get(1))
        .map_or(s, |m| m.as_str());
    let digits: String = whole
        .chars()
        .filter(|c| !matches!(c, ',' | '.' | '\''))
        .collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i64>().ok()
}

fn scaled_leading_numeral(s: &str, factor: f64) -> Option<i64> {
    let numeral = LEADING_NUMERAL_RE.find(s)?.as_str().replace(',', ".");
    let value = numeral.parse::<f64>().ok()?;
    let scaled = (value * factor).round();
    if !scaled.is_finite() {
        return None;
    }
    // Float-to-int casts saturate; prices never approach i64::MAX.
    #[allow(clippy::cast_possible_truncation)]
    Some(scaled as i64)
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
