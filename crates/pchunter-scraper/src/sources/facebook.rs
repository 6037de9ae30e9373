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

static ITEM_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/marketplace/item/\d+").expect("valid regex"));

// Class names are obfuscated and rotate, so the structural pass leans on
// roles and inline styles. The link-pattern pass is the workhorse.
static PLAN: ExtractionPlan = ExtractionPlan {
    cards: &[r#"div[role="main"] a[href*="/marketplace/item/"]"#],
    fields: FieldSelectors {
        title: r#"span[style*="line-clamp"]"#,
        price: r#"span[dir="auto"]"#,
        link: r#"a[href*="/marketplace/item/"]"#,
        image: "img",
    },
    price_reader: PriceReader::Text,
    link_pattern: Some(LinkPattern {
        href: &ITEM_LINK_RE,
        container_hints: &[r#"div[style*="border-radius"]"#],
    }),
};

/// Social marketplace search (`/marketplace/{location}/search?query=`).
///
/// Anonymous sessions are frequently shown a login wall; a session cookie can
/// be supplied to get past it.
pub struct FacebookAdapter {
    fetcher: PageFetcher,
    base_url: String,
    location: String,
    cookie: Option<String>,
}

impl FacebookAdapter {
    #[must_use]
    pub fn new(
        fetcher: PageFetcher,
        base_url: impl Into<String>,
        location: impl Into<String>,
        cookie: Option<String>,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            location: location.into(),
            cookie,
        }
    }

    fn search_url(&self, query: &str) -> Result<Url, ScraperError> {
        build_url(
            &self.base_url,
            &format!(
                "/marketplace/{}/search?query={}",
                encode_query(&self.location),
                encode_query(query)
            ),
        )
    }
}

fn parse_listings(html: &str, page_url: &Url, limit: usize) -> Result<Vec<RawListing>, ScraperError> {
    let document = Html::parse_document(html);
    extract_listings(&document, page_url, &PLAN, Source::Facebook, limit)
}

#[async_trait]
impl SourceAdapter for FacebookAdapter {
    fn source(&self) -> Source {
        Source::Facebook
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
        tracing::debug!(
            source = %Source::Facebook,
            url = %url,
            with_cookie = self.cookie.is_some(),
            "navigating"
        );

        let body = self
            .fetcher
            .fetch_page(url.as_str(), self.cookie.as_deref())
            .await?;
        let listings = parse_listings(&body, &url, limit)?;

        tracing::info!(source = %Source::Facebook, query, count = listings.len(), "extracted listings");
        Ok(listings)
    }
}
