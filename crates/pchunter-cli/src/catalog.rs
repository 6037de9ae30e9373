//! Curated-catalog command handlers, backed by the YAML catalog file.

use chrono::{Duration, Utc};
use pchunter_core::{load_catalog, AppConfig, CuratedUnit};
use pchunter_market::{assess_deal, find_underpriced, parse_and_match, InMemoryCatalog, Verdict};

use crate::tools::verdict_label;

/// Format an optional attribute for display, `"\u{2014}"` when absent.
fn fmt_attr(value: Option<&str>) -> &str {
    value.unwrap_or("\u{2014}")
}

fn short_id(unit: &CuratedUnit) -> String {
    unit.id.to_string().chars().take(8).collect()
}

/// Verdict for buying at `cost`, `None` while the unit has placeholder pricing.
fn unit_verdict(unit: &CuratedUnit, cost: i64) -> Option<Verdict> {
    if !unit.is_priced() {
        return None;
    }
    assess_deal(cost, unit.pricing()).verdict
}

/// Parse `query` into specs and list the approved units it matches, judging
/// `cost` against each one when given.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be loaded or the query is blank.
pub(crate) async fn run_search(
    config: &AppConfig,
    query: &str,
    json: bool,
    cost: Option<i64>,
) -> anyhow::Result<()> {
    let store = InMemoryCatalog::from_catalog_file(load_catalog(&config.catalog_path)?);
    let report = parse_and_match(&store, query).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("parsed: {}", serde_json::to_string(&report.parsed_query)?);
    if report.results.is_empty() {
        println!("no curated units match '{query}'");
        return Ok(());
    }

    println!(
        "{:<10}{:<18}{:<12}{:<8}{:<9}{:<10}{:<10}{:<7}VERDICT",
        "ID", "CPU", "GPU", "RAM", "STORAGE", "AVG", "DEAL AT", "LINKS"
    );
    for unit in &report.results {
        let verdict = cost.and_then(|cost| unit_verdict(unit, cost));
        println!(
            "{:<10}{:<18}{:<12}{:<8}{:<9}{:<10}{:<10}{:<7}{}",
            short_id(unit),
            fmt_attr(unit.cpu.as_deref()),
            fmt_attr(unit.gpu.as_deref()),
            fmt_attr(unit.ram.as_deref()),
            fmt_attr(unit.storage.as_deref()),
            unit.avg_price,
            unit.deal_threshold,
            unit.listing_links.len(),
            verdict_label(verdict)
        );
    }

    Ok(())
}

/// Print catalog listings from the last `since_minutes` priced at or below
/// their unit's deal threshold.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be loaded.
pub(crate) fn run_alerts(config: &AppConfig, since_minutes: u32) -> anyhow::Result<()> {
    let catalog = load_catalog(&config.catalog_path)?;
    let since = Utc::now() - Duration::minutes(i64::from(since_minutes));
    let alerts = find_underpriced(&catalog.units, since);

    if alerts.is_empty() {
        println!("no underpriced listings in the last {since_minutes} minutes");
        return Ok(());
    }

    println!("{:<18}{:<10}{:<10}{:<14}URL", "CREATED", "PRICE", "DEAL AT", "FINGERPRINT");
    for alert in &alerts {
        println!(
            "{:<18}{:<10}{:<10}{:<14}{}",
            alert.created_at.format("%Y-%m-%d %H:%M"),
            alert.price,
            alert.deal_threshold,
            &alert.fingerprint[..12],
            alert.url
        );
    }

    Ok(())
}

#[cfg(test)]
mod verdict_tests {
    use std::path::Path;

    use pchunter_core::UnitStatus;

    use super::*;

    fn sample_unit() -> CuratedUnit {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/catalog.yaml");
        load_catalog(&path)
            .unwrap()
            .units
            .into_iter()
            .find(|u| u.status == UnitStatus::Approved)
            .unwrap()
    }

    #[test]
    fn cost_under_threshold_is_a_good_deal() {
        let unit = sample_unit();
        let cost = unit.deal_threshold - 1_000;
        assert_eq!(unit_verdict(&unit, cost), Some(Verdict::GoodDeal));
    }

    #[test]
    fn cost_above_average_is_bad() {
        let unit = sample_unit();
        assert_eq!(unit_verdict(&unit, unit.avg_price + 1_000), Some(Verdict::Bad));
    }

    #[test]
    fn placeholder_pricing_has_no_verdict() {
        let mut unit = sample_unit();
        unit.avg_price = 0;
        unit.max_price = 0;
        unit.deal_threshold = 0;
        assert_eq!(unit_verdict(&unit, 50_000), None);
    }
}
