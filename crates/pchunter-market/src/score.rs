//! Deal scoring.
//!
//! Two scales:
//! - batch tiers for scanned listings, relative to the batch average
//! - a 0–10 calculator score for a buying cost against a curated unit

use pchunter_core::{AggregateStats, DealTier, NormalizedListing, ScoredListing, UnitPricing};
use serde::{Deserialize, Serialize};

/// Maximum calculator score.
const SCORE_CEILING: f64 = 10.0;
/// Score at a zero discount, before the cap.
const SCORE_BASE: f64 = 5.0;
/// Percentage points of discount per additional score point.
const PERCENT_PER_POINT: f64 = 12.0;

/// Classifies `price` against the batch average `avg`.
///
/// `great` below 80% of the average, `good` up to and including 105%, else
/// `bad`. Thresholds are compared in exact integer arithmetic.
#[must_use]
pub fn classify(price: i64, avg: i64) -> DealTier {
    let (price, avg) = (i128::from(price), i128::from(avg));
    if 5 * price < 4 * avg {
        DealTier::Great
    } else if 20 * price <= 21 * avg {
        DealTier::Good
    } else {
        DealTier::Bad
    }
}

/// Scores every listing with a positive price against `stats`, dropping the rest.
#[must_use]
pub fn score_listings(
    listings: Vec<NormalizedListing>,
    stats: &AggregateStats,
) -> Vec<ScoredListing> {
    listings
        .into_iter()
        .filter_map(|listing| {
            let score = classify(listing.positive_price()?, stats.avg);
            Some(ScoredListing { listing, score })
        })
        .collect()
}

/// Orders deals best-first: tier descending, then price ascending. The sort is
/// stable so equal deals keep their source order.
pub fn rank_deals(deals: &mut [ScoredListing]) {
    deals.sort_by_key(|deal| {
        (
            std::cmp::Reverse(deal.score),
            deal.listing.price.unwrap_or(i64::MAX),
        )
    });
}

/// Calculator verdict for a buying cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// At or below the unit's deal threshold.
    GoodDeal,
    /// Above the threshold but still under the market average.
    Risky,
    /// At or above the market average.
    Bad,
}

/// Qualitative band over the calculator score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Great,
    Fair,
    Poor,
}

impl ScoreBand {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreBand::Great
        } else if score >= 5.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBand::Great => write!(f, "great"),
            ScoreBand::Fair => write!(f, "fair"),
            ScoreBand::Poor => write!(f, "poor"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealAssessment {
    /// 0–10; zero whenever the cost is at or above the average.
    pub deal_score: f64,
    pub avg_profit: i64,
    pub max_profit: i64,
    /// Whole-percent discount below the average, zero when not below it.
    pub undervalued_percent: i64,
    /// `None` when no cost was entered (cost ≤ 0).
    pub verdict: Option<Verdict>,
    pub band: ScoreBand,
}

/// Judges a buying `cost` against a curated unit's pricing.
///
/// The score is `5 + percent_under_avg / 12`, capped at 10, and only defined
/// below the average. This curve is what the qualitative bands were tuned on.
#[must_use]
pub fn assess_deal(cost: i64, pricing: UnitPricing) -> DealAssessment {
    let avg_profit = pricing.avg_price.saturating_sub(cost);
    let max_profit = pricing.max_price.saturating_sub(cost);

    let percent_under_avg = if pricing.avg_price > 0 && cost < pricing.avg_price {
        #[allow(clippy::cast_precision_loss)]
        let pct = 100.0 * avg_profit as f64 / pricing.avg_price as f64;
        Some(pct)
    } else {
        None
    };

    let deal_score = percent_under_avg
        .map_or(0.0, |pct| (SCORE_BASE + pct / PERCENT_PER_POINT).min(SCORE_CEILING));
    // Bounded by 100 for any non-negative cost.
    #[allow(clippy::cast_possible_truncation)]
    let undervalued_percent = percent_under_avg.map_or(0, |pct| pct.round() as i64);

    let verdict = (cost > 0).then(|| {
        if cost <= pricing.deal_threshold {
            Verdict::GoodDeal
        } else if cost < pricing.avg_price {
            Verdict::Risky
        } else {
            Verdict::Bad
        }
    });

    DealAssessment {
        deal_score,
        avg_profit,
        max_profit,
        undervalued_percent,
        verdict,
        band: ScoreBand::from_score(deal_score),
    }
}

#[cfg(test)]
#[path = "score_test.rs"]
mod tests;
