use pchunter_core::{AggregateStats, NormalizedListing};

/// Computes min/max/avg over the strictly positive prices in `listings`.
///
/// The average is rounded to the nearest whole unit, halves away from zero.
/// Returns all-zero stats when no listing has a positive price.
#[must_use]
pub fn aggregate_stats(listings: &[NormalizedListing]) -> AggregateStats {
    let prices: Vec<i64> = listings
        .iter()
        .filter_map(NormalizedListing::positive_price)
        .collect();

    let (Some(&min), Some(&max)) = (prices.iter().min(), prices.iter().max()) else {
        return AggregateStats::default();
    };

    let count = prices.len();
    let sum: i128 = prices.iter().map(|&p| i128::from(p)).sum();
    let n = i128::try_from(count).unwrap_or(i128::MAX);
    // Positive sum, so (2s + n) / 2n rounds half up.
    let avg = i64::try_from((2 * sum + n) / (2 * n)).unwrap_or(max);

    AggregateStats {
        min,
        max,
        avg,
        count,
    }
}

#[cfg(test)]
mod tests {
    use pchunter_core::{RawListing, Source};

    use super::*;

    fn priced(price: Option<i64>) -> NormalizedListing {
        NormalizedListing {
            listing: RawListing {
                title: "Dell Latitude 5420".to_string(),
                raw_price_text: String::new(),
                link: "https://www.ouedkniss.com/annonce/1".to_string(),
                source: Source::Ouedkniss,
                image_url: None,
            },
            price,
        }
    }

    #[test]
    fn empty_batch_is_all_zero() {
        let stats = aggregate_stats(&[]);
        assert_eq!(stats, AggregateStats::default());
        assert!(stats.is_empty());
    }

    #[test]
    fn unpriced_listings_are_ignored() {
        let batch = [priced(None), priced(Some(0)), priced(Some(-10))];
        assert_eq!(aggregate_stats(&batch), AggregateStats::default());
    }

    #[test]
    fn stats_over_positive_subset() {
        let batch = [priced(Some(50_000)), priced(Some(52_000)), priced(Some(0))];
        let stats = aggregate_stats(&batch);
        assert_eq!(stats.min, 50_000);
        assert_eq!(stats.max, 52_000);
        assert_eq!(stats.avg, 51_000);
        assert_eq!(stats.count, 2);
    }

    #[test]
    fn average_rounds_to_nearest() {
        let batch = [priced(Some(1)), priced(Some(2))];
        assert_eq!(aggregate_stats(&batch).avg, 2);
        let batch = [priced(Some(10)), priced(Some(10)), priced(Some(11))];
        assert_eq!(aggregate_stats(&batch).avg, 10);
    }

    #[test]
    fn min_avg_max_are_ordered() {
        let batches: [&[i64]; 4] = [
            &[45_000],
            &[60_000, 1],
            &[99_999, 100_000, 100_001],
            &[13, 7, 250_000, 62_000],
        ];
        for prices in batches {
            let batch: Vec<_> = prices.iter().map(|&p| priced(Some(p))).collect();
            let stats = aggregate_stats(&batch);
            assert!(stats.min <= stats.avg && stats.avg <= stats.max, "{prices:?}");
        }
    }
}
