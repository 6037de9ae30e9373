use std::sync::LazyLock;

use async_trait::async_trait;
use pchunter_core::{RawListing, Source};
use regex::Regex;
use reqwest::Url;
use scraper::Html;

use super::{build_url, encode_query, SourceAdapter};
use crate::error::ScraperError;
use crate::extract::{
    extract_listings, page_has, ExtractionPlan, FieldSelectors, LinkPattern, PriceReader,
};
use crate::fetch::PageFetcher;

static PRODUCT_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/product/[^/?#]+").expect("valid regex"));

static PLAN: ExtractionPlan = ExtractionPlan {
    cards: &[
        "ul.products li.product",
        ".products .product",
        "li.product",
        "div.product",
    ],
    fields: FieldSelectors {
        title: ".woocommerce-loop-product__title, .product_title, h2, h3",
        price: ".price",
        link: "a.woocommerce-LoopProduct-link, a[href]",
        image: "img",
    },
    price_reader: PriceReader::WooCommerceAmount,
    link_pattern: Some(LinkPattern {
        href: &PRODUCT_LINK_RE,
        container_hints: &["li", "div.product", "article"],
    }),
};

const NO_PRODUCTS_NOTICE: &str = ".woocommerce-no-products-found";
const INFO_NOTICE: &str = ".woocommerce-info";
const PRODUCT_GRID: &str = ".products";

/// WooCommerce storefront product search (`/?s={query}&post_type=product`).
///
/// Both retail sources run the same storefront software, so one adapter
/// serves either, tagged with its [`Source`].
pub struct WooCommerceAdapter {
    source: Source,
    fetcher: PageFetcher,
    base_url: String,
}

impl WooCommerceAdapter {
    #[must_use]
    pub fn new(source: Source, fetcher: PageFetcher, base_url: impl Into<String>) -> Self {
        Self {
            source,
            fetcher,
            base_url: base_url.into(),
        }
    }

    fn search_url(&self, query: &str) -> Result<Url, ScraperError> {
        build_url(
            &self.base_url,
            &format!("/?s={}&post_type=product", encode_query(query)),
        )
    }

    fn parse_listings(
        &self,
        html: &str,
        page_url: &Url,
        limit: usize,
    ) -> Result<Vec<RawListing>, ScraperError> {
        let document = Html::parse_document(html);

        let no_results = page_has(&document, NO_PRODUCTS_NOTICE)?
            || (page_has(&document, INFO_NOTICE)? && !page_has(&document, PRODUCT_GRID)?);
        if no_results {
            tracing::debug!(source = %self.source, "storefront reported no products");
            return Ok(Vec::new());
        }

        extract_listings(&document, page_url, &PLAN, self.source, limit)
    }
}

#[async_trait]
impl SourceAdapter for WooCommerceAdapter {
    fn source(&self) -> Source {
        self.source
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
        tracing::debug!(source = %self.source, url = %url, "navigating");

        let body = self.fetcher.fetch_page(url.as_str(), None).await?;
        let listings = self.parse_listings(&body, &url, limit)?;

        tracing::info!(source = %self.source, query, count = listings.len(), "extracted listings");
        Ok(listings)
    }
}
