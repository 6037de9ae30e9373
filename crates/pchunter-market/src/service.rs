//! Catalog-facing operations: search by free text and worker submissions.

use pchunter_core::{CuratedUnit, NewListingLink, ParsedSpec, PendingUnit};
use pchunter_scraper::{normalize_price, parse_specs};
use serde::{Deserialize, Serialize};

use crate::catalog::{build_filter, CatalogStore};
use crate::error::MarketError;

/// Attributes read from a search query and the curated units they matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub parsed_query: ParsedSpec,
    pub results: Vec<CuratedUnit>,
}

/// Extracts specs from `query` and returns the approved units matching them.
///
/// Access control belongs to the caller.
///
/// # Errors
///
/// Returns [`MarketError::EmptyQuery`] for blank text, or the store's
/// [`MarketError::Catalog`] failure.
pub async fn parse_and_match(
    store: &dyn CatalogStore,
    query: &str,
) -> Result<MatchReport, MarketError> {
    if query.trim().is_empty() {
        return Err(MarketError::EmptyQuery);
    }

    let parsed_query = parse_specs(query);
    let filter = build_filter(&parsed_query);
    let results = store.find_units(&filter).await?;

    tracing::info!(query, matched = results.len(), "catalog search");
    Ok(MatchReport {
        parsed_query,
        results,
    })
}

/// A listing a worker found in the field and wants catalogued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSubmission {
    pub title: String,
    pub raw_price_text: String,
    pub url: String,
}

/// Creates a pending curated unit from a worker's listing.
///
/// # Errors
///
/// Returns [`MarketError::InvalidSubmission`] when the url is blank or the
/// price does not normalize to a positive amount, or the store's failure.
pub async fn submit_listing(
    store: &dyn CatalogStore,
    submission: WorkerSubmission,
) -> Result<CuratedUnit, MarketError> {
    let url = submission.url.trim();
    if url.is_empty() {
        return Err(MarketError::InvalidSubmission {
            reason: "listing url is required".to_string(),
        });
    }

    let price = normalize_price(&submission.raw_price_text)
        .filter(|p| *p > 0)
        .ok_or_else(|| MarketError::InvalidSubmission {
            reason: format!("unreadable price: {:?}", submission.raw_price_text),
        })?;

    let pending = PendingUnit {
        spec: parse_specs(&submission.title),
        link: NewListingLink {
            url: url.to_string(),
            price,
        },
    };
    store.create_pending(pending).await
}
