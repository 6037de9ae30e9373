//! Offline helpers: spec extraction, price normalization, deal calculator.

use pchunter_core::UnitPricing;
use pchunter_market::{assess_deal, Verdict};
use pchunter_scraper::{normalize_price, parse_specs};

/// # Errors
///
/// Returns an error if the parsed specs cannot be serialized.
pub(crate) fn run_parse(text: &str) -> anyhow::Result<()> {
    let spec = parse_specs(text);
    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}

pub(crate) fn run_price(text: &str) {
    match normalize_price(text) {
        Some(price) => println!("{price}"),
        None => println!("unrecognised price: {text:?}"),
    }
}

pub(crate) fn verdict_label(verdict: Option<Verdict>) -> &'static str {
    match verdict {
        Some(Verdict::GoodDeal) => "good deal",
        Some(Verdict::Risky) => "risky",
        Some(Verdict::Bad) => "bad",
        None => "\u{2014}",
    }
}

pub(crate) fn run_assess(cost: i64, avg: i64, max: i64, threshold: i64) {
    let assessment = assess_deal(
        cost,
        UnitPricing {
            avg_price: avg,
            max_price: max,
            deal_threshold: threshold,
        },
    );

    println!("verdict:      {}", verdict_label(assessment.verdict));
    println!(
        "deal score:   {:.1} ({})",
        assessment.deal_score, assessment.band
    );
    println!("undervalued:  {}%", assessment.undervalued_percent);
    println!("profit (avg): {}", assessment.avg_profit);
    println!("profit (max): {}", assessment.max_profit);
}

#[cfg(test)]
mod label_tests {
    use super::*;

    #[test]
    fn missing_verdict_renders_dash() {
        assert_eq!(verdict_label(None), "\u{2014}");
        assert_eq!(verdict_label(Some(Verdict::GoodDeal)), "good deal");
    }
}
