//! Underpriced-listing trigger.
//!
//! A poller calls [`find_underpriced`] with the time of its previous run and
//! forwards the alerts; scheduling and delivery live outside this crate.

use chrono::{DateTime, Utc};
use pchunter_core::{CuratedUnit, UnitStatus};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnderpricedAlert {
    pub unit_id: Uuid,
    pub url: String,
    pub price: i64,
    pub deal_threshold: i64,
    pub created_at: DateTime<Utc>,
    /// Hex SHA-256 of the listing url, stable across polls.
    pub fingerprint: String,
}

/// Listing links created after `since` on approved units whose price is at
/// or below the unit's deal threshold.
#[must_use]
pub fn find_underpriced(units: &[CuratedUnit], since: DateTime<Utc>) -> Vec<UnderpricedAlert> {
    let alerts: Vec<UnderpricedAlert> = units
        .iter()
        .filter(|unit| unit.status == UnitStatus::Approved)
        .flat_map(|unit| {
            unit.listing_links
                .iter()
                .filter(move |link| {
                    link.created_at > since && link.price > 0 && link.price <= unit.deal_threshold
                })
                .map(move |link| UnderpricedAlert {
                    unit_id: unit.id,
                    url: link.url.clone(),
                    price: link.price,
                    deal_threshold: unit.deal_threshold,
                    created_at: link.created_at,
                    fingerprint: fingerprint(&link.url),
                })
        })
        .collect();

    if !alerts.is_empty() {
        tracing::info!(count = alerts.len(), since = %since, "underpriced listings found");
    }
    alerts
}

fn fingerprint(url: &str) -> String {
    format!("{:x}", Sha256::digest(url.as_bytes()))
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use pchunter_core::ListingLink;

    use super::*;

    fn link(url: &str, price: i64, created_at: DateTime<Utc>) -> ListingLink {
        ListingLink {
            id: Uuid::new_v4(),
            url: url.to_string(),
            price,
            created_at,
        }
    }

    fn unit(status: UnitStatus, threshold: i64, links: Vec<ListingLink>) -> CuratedUnit {
        CuratedUnit {
            id: Uuid::new_v4(),
            category: None,
            cpu: Some("I7 12th Gen".to_string()),
            gpu: None,
            ram: None,
            storage: None,
            condition: None,
            min_price: 140_000,
            avg_price: 170_000,
            max_price: 190_000,
            deal_threshold: threshold,
            confidence_score: None,
            proof_url: None,
            status,
            last_updated: Utc::now(),
            listing_links: links,
        }
    }

    #[test]
    fn only_new_links_at_or_below_threshold_alert() {
        let now = Utc::now();
        let since = now - Duration::minutes(10);
        let units = [unit(
            UnitStatus::Approved,
            160_000,
            vec![
                link("https://a.test/at-threshold", 160_000, now),
                link("https://a.test/above", 160_001, now),
                link("https://a.test/old", 100_000, since - Duration::minutes(1)),
                link("https://a.test/at-since", 100_000, since),
                link("https://a.test/zero", 0, now),
            ],
        )];

        let alerts = find_underpriced(&units, since);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].url, "https://a.test/at-threshold");
        assert_eq!(alerts[0].deal_threshold, 160_000);
        assert_eq!(alerts[0].unit_id, units[0].id);
    }

    #[test]
    fn pending_units_never_alert() {
        let now = Utc::now();
        let units = [unit(
            UnitStatus::Pending,
            160_000,
            vec![link("https://a.test/1", 90_000, now)],
        )];
        assert!(find_underpriced(&units, now - Duration::hours(1)).is_empty());
    }

    #[test]
    fn fingerprint_is_stable_sha256_hex() {
        let a = fingerprint("https://www.ouedkniss.com/annonce/1");
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(a, fingerprint("https://www.ouedkniss.com/annonce/1"));
        assert_ne!(a, fingerprint("https://www.ouedkniss.com/annonce/2"));
        assert_eq!(
            fingerprint(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
