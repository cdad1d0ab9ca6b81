//! HTML parser for listing and detail pages
//!
//! This module turns raw HTML into owned values:
//! - The total-count label, load-more URL and item count of the initial listing
//! - The item nodes (title link) of a listing page
//! - The text region of a detail page
//!
//! No `scraper` document outlives a single function call, so parsed pages
//! never cross an await point.

use crate::config::SelectorConfig;
use crate::{ConfigError, DiscoveryError};
use scraper::{ElementRef, Html, Selector};

/// Compiled CSS selectors for listing and detail pages
#[derive(Debug, Clone)]
pub struct PageSelectors {
    pub counter: Selector,
    pub load_more: Selector,
    pub load_more_attr: String,
    pub initial_item: Selector,
    pub page_item: Selector,
    pub item_link: Selector,
    pub detail_text: Selector,
}

impl PageSelectors {
    /// Compiles every selector of the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(PageSelectors)` - All selectors compiled
    /// * `Err(ConfigError::InvalidSelector)` - The first selector that failed
    pub fn compile(config: &SelectorConfig) -> Result<Self, ConfigError> {
        if config.load_more_attr.trim().is_empty() {
            return Err(ConfigError::Validation(
                "load-more-attr cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            counter: compile_selector("counter", &config.counter)?,
            load_more: compile_selector("load-more", &config.load_more)?,
            load_more_attr: config.load_more_attr.clone(),
            initial_item: compile_selector("initial-item", &config.initial_item)?,
            page_item: compile_selector("page-item", &config.page_item)?,
            item_link: compile_selector("item-link", &config.item_link)?,
            detail_text: compile_selector("detail-text", &config.detail_text)?,
        })
    }
}

fn compile_selector(name: &str, selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("{} '{}': {:?}", name, selector, e)))
}

/// Values read from the initial (unpaged) listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialListing {
    /// Text of the total-count label
    pub counter_text: Option<String>,

    /// URL attribute of the load-more control, as written in the page
    pub load_more_href: Option<String>,

    /// Number of item nodes on the page
    pub item_count: usize,
}

/// One entry of a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemNode {
    /// `href` of the title link, if the item has one
    pub link: Option<String>,

    /// Title text, for log messages
    pub title: Option<String>,
}

/// Parses the initial listing page
///
/// # Example
///
/// ```
/// use acts_harvester::config::SelectorConfig;
/// use acts_harvester::crawler::{parse_initial_listing, PageSelectors};
///
/// let selectors = PageSelectors::compile(&SelectorConfig::default()).unwrap();
/// let html = r#"<div class="results"><div class="results_counter">12 documents</div></div>
///     <button id="la_load" data-cross-ajax-url="/na/more?Page=1">More</button>"#;
/// let listing = parse_initial_listing(html, &selectors);
/// assert_eq!(listing.counter_text.as_deref(), Some("12 documents"));
/// assert_eq!(listing.load_more_href.as_deref(), Some("/na/more?Page=1"));
/// assert_eq!(listing.item_count, 0);
/// ```
pub fn parse_initial_listing(html: &str, selectors: &PageSelectors) -> InitialListing {
    let document = Html::parse_document(html);

    let counter_text = document
        .select(&selectors.counter)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty());

    let load_more_href = document
        .select(&selectors.load_more)
        .next()
        .and_then(|element| element.value().attr(&selectors.load_more_attr))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty());

    let item_count = document.select(&selectors.initial_item).count();

    InitialListing {
        counter_text,
        load_more_href,
        item_count,
    }
}

/// Reads the total item count from the counter label
///
/// The label starts with the number, e.g. `"1342 documents"`.
pub fn parse_counter(text: &str) -> Result<u64, DiscoveryError> {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<u64>().ok())
        .ok_or_else(|| DiscoveryError::UnparsableCounter(text.to_string()))
}

/// Extracts the item nodes of a listing page in document order
pub fn parse_listing_items(html: &str, item: &Selector, link: &Selector) -> Vec<ItemNode> {
    let document = Html::parse_document(html);

    document
        .select(item)
        .map(|node| {
            let anchor = node.select(link).next();
            ItemNode {
                link: anchor
                    .and_then(|a| a.value().attr("href"))
                    .map(|href| href.trim().to_string())
                    .filter(|href| !href.is_empty()),
                title: anchor.map(element_text).filter(|t| !t.is_empty()),
            }
        })
        .collect()
}

/// Extracts the document text of a detail page
///
/// Text nodes of the first matching region are trimmed and joined by
/// newlines. Returns None if the region is missing or holds no text.
pub fn extract_text(html: &str, selector: &Selector) -> Option<String> {
    let document = Html::parse_document(html);
    let region = document.select(selector).next()?;

    let text = region
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Text of an element with whitespace collapsed to single spaces
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
