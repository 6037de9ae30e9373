use serde::{Deserialize, Serialize};

/// The site a listing was scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// Classifieds site (ouedkniss), sits behind anti-bot defenses.
    Ouedkniss,
    /// Social marketplace (Facebook Marketplace).
    Facebook,
    /// WooCommerce retail storefront (Kouba Computer).
    Kouba,
    /// WooCommerce retail storefront (Digitec).
    Digitec,
}

impl Source {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Source::Ouedkniss => "ouedkniss",
            Source::Facebook => "facebook",
            Source::Kouba => "kouba",
            Source::Digitec => "digitec",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing as extracted from a source page, before price normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawListing {
    pub title: String,
    /// Price text exactly as displayed, e.g. `"62 000 DA"` or `"6m"`.
    pub raw_price_text: String,
    /// Absolute URL of the listing page.
    pub link: String,
    pub source: Source,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A [`RawListing`] with its price resolved to whole currency units (DA).
///
/// `price` is `None` when the raw text could not be resolved confidently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedListing {
    #[serde(flatten)]
    pub listing: RawListing,
    pub price: Option<i64>,
}

impl NormalizedListing {
    /// Returns the price when it is strictly positive.
    #[must_use]
    pub fn positive_price(&self) -> Option<i64> {
        self.price.filter(|p| *p > 0)
    }
}

/// Qualitative deal tier of a listing relative to its batch average.
///
/// Variant order is the tier rank: `Bad < Good < Great`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealTier {
    Bad,
    Good,
    Great,
}

impl std::fmt::Display for DealTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DealTier::Bad => write!(f, "bad"),
            DealTier::Good => write!(f, "good"),
            DealTier::Great => write!(f, "great"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredListing {
    #[serde(flatten)]
    pub listing: NormalizedListing,
    pub score: DealTier,
}

/// Price statistics over the positive-priced listings of one scan.
///
/// All fields are zero when no listing survived filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub min: i64,
    pub max: i64,
    pub avg: i64,
    pub count: usize,
}

impl AggregateStats {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(price: Option<i64>) -> NormalizedListing {
        NormalizedListing {
            listing: RawListing {
                title: "Dell Latitude 5420".to_string(),
                raw_price_text: "62 000 DA".to_string(),
                link: "https://www.ouedkniss.com/annonce/1".to_string(),
                source: Source::Ouedkniss,
                image_url: None,
            },
            price,
        }
    }

    #[test]
    fn positive_price_filters_zero_and_none() {
        assert_eq!(listing(Some(62_000)).positive_price(), Some(62_000));
        assert_eq!(listing(Some(0)).positive_price(), None);
        assert_eq!(listing(Some(-5)).positive_price(), None);
        assert_eq!(listing(None).positive_price(), None);
    }

    #[test]
    fn tier_order_is_rank() {
        assert!(DealTier::Bad < DealTier::Good);
        assert!(DealTier::Good < DealTier::Great);
    }

    #[test]
    fn scored_listing_serializes_flat() {
        let scored = ScoredListing {
            listing: listing(Some(50_000)),
            score: DealTier::Good,
        };
        let value = serde_json::to_value(&scored).unwrap();
        assert_eq!(value["title"], "Dell Latitude 5420");
        assert_eq!(value["source"], "ouedkniss");
        assert_eq!(value["price"], 50_000);
        assert_eq!(value["score"], "good");
        assert!(value.get("image_url").is_none());
    }
}
