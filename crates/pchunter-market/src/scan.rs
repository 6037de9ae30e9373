//! Live market scan across every source adapter.

use std::sync::Arc;

use futures::future::join_all;
use pchunter_core::{AggregateStats, NormalizedListing, RawListing, ScoredListing, Source};
use pchunter_scraper::{normalize_price, ScraperError, SourceAdapter};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::error::MarketError;
use crate::score::{rank_deals, score_listings};
use crate::stats::aggregate_stats;

/// Result of one scan: batch statistics plus every priced listing with its tier.
///
/// Zero surviving listings is a valid report with all-zero stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub model: String,
    #[serde(flatten)]
    pub stats: AggregateStats,
    /// Best deals first.
    pub deals: Vec<ScoredListing>,
}

/// Fans a query out to all sources with a ceiling on simultaneous sessions.
///
/// One orchestrator is meant to be shared (e.g. behind an `Arc`) so the
/// session ceiling holds across concurrent scans.
pub struct ScanOrchestrator {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    sessions: Arc<Semaphore>,
    listing_limit: usize,
}

impl ScanOrchestrator {
    /// `max_concurrent_sessions` is clamped to at least 1.
    #[must_use]
    pub fn new(
        adapters: Vec<Arc<dyn SourceAdapter>>,
        max_concurrent_sessions: usize,
        listing_limit: usize,
    ) -> Self {
        Self {
            adapters,
            sessions: Arc::new(Semaphore::new(max_concurrent_sessions.max(1))),
            listing_limit,
        }
    }

    #[must_use]
    pub fn sources(&self) -> Vec<Source> {
        self.adapters.iter().map(|a| a.source()).collect()
    }

    /// Scans every source for `model`.
    ///
    /// Sources run concurrently and independently. A failing source is logged
    /// and contributes no listings; it does not cancel the others. Nothing is
    /// retried.
    ///
    /// # Errors
    ///
    /// Returns [`MarketError::EmptyQuery`] for a blank model, before any source
    /// is contacted.
    pub async fn scan(&self, model: &str) -> Result<ScanReport, MarketError> {
        let model = model.trim();
        if model.is_empty() {
            return Err(MarketError::EmptyQuery);
        }

        tracing::info!(model, sources = self.adapters.len(), "scan started");

        let outcomes = join_all(
            self.adapters
                .iter()
                .map(|adapter| self.run_adapter(Arc::clone(adapter), model)),
        )
        .await;

        let mut raw = Vec::new();
        for (source, outcome) in outcomes {
            match outcome {
                Ok(listings) => {
                    tracing::info!(source = %source, count = listings.len(), "source returned listings");
                    raw.extend(listings);
                }
                Err(e) => {
                    tracing::warn!(
                        source = %source,
                        error = %e,
                        "source failed; contributing no listings"
                    );
                }
            }
        }

        let normalized: Vec<NormalizedListing> = raw.into_iter().map(normalize_listing).collect();
        let report = build_report(model, normalized);

        tracing::info!(
            model,
            count = report.stats.count,
            min = report.stats.min,
            avg = report.stats.avg,
            max = report.stats.max,
            "scan complete"
        );
        Ok(report)
    }

    async fn run_adapter(
        &self,
        adapter: Arc<dyn SourceAdapter>,
        model: &str,
    ) -> (Source, Result<Vec<RawListing>, ScraperError>) {
        let source = adapter.source();
        let Ok(_permit) = self.sessions.acquire().await else {
            tracing::warn!(source = %source, "session pool closed; skipping source");
            return (source, Ok(Vec::new()));
        };

        let result = adapter
            .fetch_listings(model, self.listing_limit)
            .await
            .map(|mut listings| {
                listings.truncate(self.listing_limit);
                listings
            });
        (source, result)
    }
}

fn normalize_listing(listing: RawListing) -> NormalizedListing {
    let price = normalize_price(&listing.raw_price_text);
    if price.is_none() {
        tracing::debug!(
            source = %listing.source,
            raw_price = %listing.raw_price_text,
            "price text not understood"
        );
    }
    NormalizedListing { listing, price }
}

fn build_report(model: &str, normalized: Vec<NormalizedListing>) -> ScanReport {
    let priced: Vec<NormalizedListing> = normalized
        .into_iter()
        .filter(|l| l.positive_price().is_some())
        .collect();
    let stats = aggregate_stats(&priced);
    let mut deals = score_listings(priced, &stats);
    rank_deals(&mut deals);

    ScanReport {
        model: model.to_string(),
        stats,
        deals,
    }
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
