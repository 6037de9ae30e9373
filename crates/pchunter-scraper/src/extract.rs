//! Selector-ladder extraction of listing cards from a fetched page.
//!
//! Strategies run in order and the first one that yields a usable listing wins:
//! 1. each card selector in [`ExtractionPlan::cards`], most specific first
//! 2. the link-pattern heuristic: anchors whose `href` looks like a listing,
//!    with title and price recovered from the enclosing container's text
//!
//! A card without both a title and a price is skipped rather than failing the
//! page. Zero listings after every strategy is `Ok(vec![])`.

use std::collections::HashSet;
use std::sync::LazyLock;

use pchunter_core::{RawListing, Source};
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::price::{effective_price_text, normalize_price};

/// CSS selectors for the fields of one listing card, relative to the card.
pub(crate) struct FieldSelectors {
    pub title: &'static str,
    pub price: &'static str,
    pub link: &'static str,
    pub image: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PriceReader {
    /// The price element's text as displayed.
    Text,
    /// A WooCommerce `.price` block: the sale (`<ins>`) amount, else the last
    /// `.amount`, else the last amount in the block's text.
    WooCommerceAmount,
}

/// Last-resort strategy: anchors whose `href` matches a listing URL shape.
pub(crate) struct LinkPattern {
    pub href: &'static LazyLock<Regex>,
    /// Ancestor selectors tried, nearest first, to find the card container.
    /// The anchor's parent is used when none match.
    pub container_hints: &'static [&'static str],
}

pub(crate) struct ExtractionPlan {
    pub cards: &'static [&'static str],
    pub fields: FieldSelectors,
    pub price_reader: PriceReader,
    pub link_pattern: Option<LinkPattern>,
}

/// Titles shorter than this are navigation chrome, not listings.
const MIN_FALLBACK_TITLE_CHARS: usize = 10;

// A line holding nothing but an amount, optional currency or informal marker.
static PRICE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\d\s.,]+\s*(?:da|dzd|د\.ج|دج|k|m)?$").expect("valid regex")
});
static WOO_SALE_AMOUNT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("ins .amount").expect("valid selector"));
static WOO_AMOUNT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".amount").expect("valid selector"));
static ANCHOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid selector"));

pub(crate) fn parse_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_owned(),
        reason: format!("{e:?}"),
    })
}

/// Returns `true` if any element on the page matches `selector`.
pub(crate) fn page_has(document: &Html, selector: &str) -> Result<bool, ScraperError> {
    let selector = parse_selector(selector)?;
    Ok(document.select(&selector).next().is_some())
}

struct CompiledFields {
    title: Selector,
    price: Selector,
    link: Selector,
    image: Selector,
}

impl CompiledFields {
    fn compile(fields: &FieldSelectors) -> Result<Self, ScraperError> {
        Ok(Self {
            title: parse_selector(fields.title)?,
            price: parse_selector(fields.price)?,
            link: parse_selector(fields.link)?,
            image: parse_selector(fields.image)?,
        })
    }
}

/// Runs the plan's strategy ladder over `document`, returning at most `limit`
/// listings.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] if a selector in the plan does
/// not parse. Pages that simply match nothing are `Ok(vec![])`.
pub(crate) fn extract_listings(
    document: &Html,
    page_url: &Url,
    plan: &ExtractionPlan,
    source: Source,
    limit: usize,
) -> Result<Vec<RawListing>, ScraperError> {
    let fields = CompiledFields::compile(&plan.fields)?;

    for (rank, card_selector) in plan.cards.iter().enumerate() {
        let selector = parse_selector(card_selector)?;
        let listings: Vec<RawListing> = document
            .select(&selector)
            .filter_map(|card| read_card(card, &fields, plan.price_reader, page_url, source))
            .take(limit)
            .collect();

        if !listings.is_empty() {
            tracing::debug!(
                source = %source,
                selector = card_selector,
                rank,
                count = listings.len(),
                "card selector matched"
            );
            return Ok(listings);
        }
    }

    if let Some(pattern) = &plan.link_pattern {
        let listings = link_pattern_listings(document, pattern, page_url, source, limit)?;
        if !listings.is_empty() {
            tracing::debug!(
                source = %source,
                count = listings.len(),
                "link-pattern fallback matched"
            );
        }
        return Ok(listings);
    }

    Ok(Vec::new())
}

fn read_card(
    card: ElementRef<'_>,
    fields: &CompiledFields,
    price_reader: PriceReader,
    page_url: &Url,
    source: Source,
) -> Option<RawListing> {
    let title = card
        .select(&fields.title)
        .map(element_text)
        .find(|t| !t.is_empty())?;

    let price_el = card.select(&fields.price).next()?;
    let raw_price_text = match price_reader {
        PriceReader::Text => Some(element_text(price_el)),
        PriceReader::WooCommerceAmount => woocommerce_amount(price_el),
    }
    .filter(|t| !t.is_empty())?;

    // A card that is itself the anchor carries its own href.
    let href = card
        .select(&fields.link)
        .find_map(|a| a.value().attr("href"))
        .or_else(|| card.value().attr("href"));
    let link = href
        .and_then(|h| resolve(page_url, h))
        .unwrap_or_else(|| page_url.to_string());

    let image_url = card
        .select(&fields.image)
        .find_map(|img| img.value().attr("src").or_else(|| img.value().attr("data-src")))
        .and_then(|src| resolve(page_url, src));

    Some(RawListing {
        title,
        raw_price_text,
        link,
        source,
        image_url,
    })
}

fn woocommerce_amount(price_el: ElementRef<'_>) -> Option<String> {
    let amount_text = price_el
        .select(&WOO_SALE_AMOUNT)
        .next()
        .or_else(|| price_el.select(&WOO_AMOUNT).last())
        .map_or_else(|| element_text(price_el), element_text);
    effective_price_text(&amount_text)
}

fn link_pattern_listings(
    document: &Html,
    pattern: &LinkPattern,
    page_url: &Url,
    source: Source,
    limit: usize,
) -> Result<Vec<RawListing>, ScraperError> {
    let hints = pattern
        .container_hints
        .iter()
        .map(|hint| parse_selector(hint))
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    let mut listings = Vec::new();

    for anchor in document.select(&ANCHOR) {
        if listings.len() >= limit {
            break;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !pattern.href.is_match(href) {
            continue;
        }
        let Some(link) = resolve(page_url, href) else {
            continue;
        };
        if !seen.insert(link.clone()) {
            continue;
        }
        let Some(container) = enclosing_container(anchor, &hints) else {
            continue;
        };
        if let Some((title, raw_price_text)) = title_and_price_from_text(container) {
            listings.push(RawListing {
                title,
                raw_price_text,
                link,
                source,
                image_url: None,
            });
        }
    }

    Ok(listings)
}

/// Nearest ancestor matching a hint, else the anchor's parent element.
fn enclosing_container<'a>(anchor: ElementRef<'a>, hints: &[Selector]) -> Option<ElementRef<'a>> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| hints.iter().any(|hint| hint.matches(el)))
        .or_else(|| anchor.parent().and_then(ElementRef::wrap))
}

/// Price is the first line shaped like a bare amount, else the first line that
/// normalizes to a positive amount; title is the first other line long enough
/// to be a listing title.
///
/// Titles such as "2021 MacBook Air M1" normalize too, hence the shape check.
fn title_and_price_from_text(container: ElementRef<'_>) -> Option<(String, String)> {
    let lines: Vec<&str> = container
        .text()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let priced = |line: &&str| {
        line.chars().any(|c| c.is_ascii_digit()) && normalize_price(line).is_some_and(|p| p > 0)
    };
    let price_idx = lines
        .iter()
        .position(|line| PRICE_LINE_RE.is_match(line) && priced(line))
        .or_else(|| lines.iter().position(|line| priced(line)))?;
    let title = lines
        .iter()
        .enumerate()
        .find(|(idx, line)| *idx != price_idx && line.chars().count() > MIN_FALLBACK_TITLE_CHARS)
        .map(|(_, line)| (*line).to_string())?;

    Some((title, lines[price_idx].to_string()))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    base.join(href.trim()).ok().map(String::from)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
