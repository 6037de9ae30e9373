//! `scan` command handler.

use pchunter_core::AppConfig;
use pchunter_market::ScanOrchestrator;
use pchunter_scraper::build_default_adapters;

const TITLE_WIDTH: usize = 60;

/// Run a live scan for `model` and print the ranked deals.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or the model is blank.
/// Individual source failures are logged, not returned.
pub(crate) async fn run_scan(config: &AppConfig, model: &str, json: bool) -> anyhow::Result<()> {
    let adapters = build_default_adapters(config)?;
    let orchestrator = ScanOrchestrator::new(
        adapters,
        config.max_concurrent_sessions,
        config.scan_listing_limit,
    );

    let report = orchestrator.scan(model).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.stats.is_empty() {
        println!("no priced listings found for '{}'", report.model);
        return Ok(());
    }

    println!(
        "{} listings for '{}': min {} / avg {} / max {} DA",
        report.stats.count, report.model, report.stats.min, report.stats.avg, report.stats.max
    );
    println!();
    println!("{:<8}{:<12}{:<11}TITLE", "TIER", "PRICE", "SOURCE");
    for deal in &report.deals {
        let price = deal
            .listing
            .price
            .map_or_else(|| "?".to_string(), |p| p.to_string());
        println!(
            "{:<8}{:<12}{:<11}{}",
            deal.score,
            price,
            deal.listing.listing.source,
            truncate(&deal.listing.listing.title, TITLE_WIDTH)
        );
        println!("{:<31}{}", "", deal.listing.listing.link);
    }

    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('\u{2026}');
    cut
}

#[cfg(test)]
mod truncate_tests {
    use super::truncate;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate("Dell Latitude", 60), "Dell Latitude");
    }

    #[test]
    fn long_text_is_cut_on_char_boundary() {
        let cut = truncate("حاسوب محمول ديل", 5);
        assert_eq!(cut.chars().count(), 5);
        assert!(cut.ends_with('\u{2026}'));
    }
}
