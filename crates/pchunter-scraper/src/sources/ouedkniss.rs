use std::sync::LazyLock;

use async_trait::async_trait;
use pchunter_core::{RawListing, Source};
use regex::Regex;
use reqwest::Url;
use scraper::Html;

use super::{build_url, encode_query, SourceAdapter};
use crate::error::ScraperError;
use crate::extract::{extract_listings, ExtractionPlan, FieldSelectors, LinkPattern, PriceReader};
use crate::fetch::PageFetcher;

static ANNOUNCEMENT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(?:annonce|store)/").expect("valid regex"));

// The classifieds markup is reshuffled often; generic grid classes trail the
// named announcement cards.
static PLAN: ExtractionPlan = ExtractionPlan {
    cards: &[
        "div.announcement",
        r#"div[data-cy="announcement"]"#,
        ".o-layout__item",
        "div.v-card",
    ],
    fields: FieldSelectors {
        title: r#"h2, h3, [class*="title"]"#,
        price: r#"[class*="price"]"#,
        link: "a[href]",
        image: "img",
    },
    price_reader: PriceReader::Text,
    link_pattern: Some(LinkPattern {
        href: &ANNOUNCEMENT_LINK_RE,
        container_hints: &["div.v-card", "article", "li"],
    }),
};

/// Classifieds site search (`/s/{query}`).
pub struct OuedknissAdapter {
    fetcher: PageFetcher,
    base_url: String,
}

impl OuedknissAdapter {
    #[must_use]
    pub fn new(fetcher: PageFetcher, base_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, query: &str) -> Result<Url, ScraperError> {
        build_url(&self.base_url, &format!("/s/{}", encode_query(query)))
    }
}

fn parse_listings(html: &str, page_url: &Url, limit: usize) -> Result<Vec<RawListing>, ScraperError> {
    let document = Html::parse_document(html);
    extract_listings(&document, page_url, &PLAN, Source::Ouedkniss, limit)
}

#[async_trait]
impl SourceAdapter for OuedknissAdapter {
    fn source(&self) -> Source {
        Source::Ouedkniss
    }

    async fn fetch_listings(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RawListing>, ScraperError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let url = self.search_url(query)?;
        tracing::debug!(source = %Source::Ouedkniss, url = %url, "navigating");

        let body = self.fetcher.fetch_page(url.as_str(), None).await?;
        let listings = parse_listings(&body, &url, limit)?;

        tracing::info!(source = %Source::Ouedkniss, query, count = listings.len(), "extracted listings");
        Ok(listings)
    }
}
