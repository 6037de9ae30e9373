//! Source adapters: one per site, each owning its URL shape and selector ladder.
//!
//! Adapters return `Err` for navigation failures, anti-bot challenges and bad
//! statuses. They never retry. Callers that fan out across sources are
//! expected to turn an `Err` into an empty contribution for that source.

mod facebook;
mod ouedkniss;
mod woocommerce;

use std::sync::Arc;

use async_trait::async_trait;
use pchunter_core::{AppConfig, RawListing, Source};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Url;

use crate::error::ScraperError;
use crate::fetch::{FetchSettings, PageFetcher};

pub use facebook::FacebookAdapter;
pub use ouedkniss::OuedknissAdapter;
pub use woocommerce::WooCommerceAdapter;

/// A site that can be searched for listings.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    fn source(&self) -> Source;

    /// Searches the site for `query`, returning at most `limit` listings.
    ///
    /// A page that loads but shows no listings is `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] on timeout, anti-bot challenge, non-2xx status
    /// or transport failure.
    async fn fetch_listings(&self, query: &str, limit: usize)
        -> Result<Vec<RawListing>, ScraperError>;
}

/// Builds the four production adapters from configuration, sharing one
/// [`PageFetcher`].
///
/// # Errors
///
/// Returns [`ScraperError::Http`] if the HTTP client cannot be constructed.
pub fn build_default_adapters(
    config: &AppConfig,
) -> Result<Vec<Arc<dyn SourceAdapter>>, ScraperError> {
    let fetcher = PageFetcher::new(FetchSettings::from_app_config(config))?;

    Ok(vec![
        Arc::new(OuedknissAdapter::new(
            fetcher.clone(),
            config.classifieds_url.clone(),
        )),
        Arc::new(FacebookAdapter::new(
            fetcher.clone(),
            config.marketplace_url.clone(),
            config.marketplace_location.clone(),
            config.marketplace_cookie.clone(),
        )),
        Arc::new(WooCommerceAdapter::new(
            Source::Kouba,
            fetcher.clone(),
            config.retailer_a_url.clone(),
        )),
        Arc::new(WooCommerceAdapter::new(
            Source::Digitec,
            fetcher,
            config.retailer_b_url.clone(),
        )),
    ])
}

/// Percent-encodes a search query for use in a path segment or query value.
pub(crate) fn encode_query(query: &str) -> String {
    utf8_percent_encode(query.trim(), NON_ALPHANUMERIC).to_string()
}

/// Joins `base` (scheme and host, optional trailing slash) with a
/// path-and-query suffix.
pub(crate) fn build_url(base: &str, suffix: &str) -> Result<Url, ScraperError> {
    let raw = format!("{}{suffix}", base.trim_end_matches('/'));
    Url::parse(&raw).map_err(|e| ScraperError::InvalidUrl {
        url: raw,
        reason: e.to_string(),
    })
}
