//! Paginator - bounds discovery and page iteration
//!
//! The paginator reads the initial listing page once to learn how many items
//! remain and how many fit on a page, then walks the paged listing from the
//! page holding the resume index onwards:
//!
//! 1. Fetch the initial listing, read the total-count label, count its items
//!    and take the paged listing URL from the load-more control
//! 2. Compute the first page and the in-page offset of the resume index
//! 3. For each page in order: fetch it, drop the already-written items (first
//!    page only), extract every remaining item
//!
//! Documents come out in site order. Nothing is skipped or repeated between a
//! run and the run resumed from its last written index.

use crate::config::{Config, PagingConfig};
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{
    parse_counter, parse_initial_listing, parse_listing_items, ItemNode, PageSelectors,
};
use crate::document::Document;
use crate::state::{CrawlBounds, ResumeState};
use crate::url::{resolve_href, strip_query};
use crate::{ConfigError, CrawlError, DiscoveryError};
use async_stream::try_stream;
use futures::stream::{self, Stream, StreamExt};
use futures::pin_mut;
use std::ops::Range;
use std::sync::Arc;
use url::Url;

/// Where the listing lives and how its pages are shaped
#[derive(Debug, Clone)]
pub struct ListingLayout {
    /// URL of the initial (unpaged) listing
    pub listing_url: Url,
    pub selectors: PageSelectors,
    pub paging: PagingConfig,
}

impl ListingLayout {
    /// Builds the layout from the configuration
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let base = Url::parse(&config.site.base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.site.base_url, e)))?;
        let listing_url = base
            .join(&config.site.listing_path)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.site.listing_path, e)))?;

        Ok(Self {
            listing_url,
            selectors: PageSelectors::compile(&config.selectors)?,
            paging: config.paging.clone(),
        })
    }

    /// Query parameters of the paged listing request for `page_idx`
    pub fn page_query(&self, page_idx: u64) -> Vec<(String, String)> {
        vec![
            (
                self.paging.filter_param.clone(),
                self.paging.filter_value.clone(),
            ),
            (self.paging.page_param.clone(), page_idx.to_string()),
        ]
    }
}

/// Everything learned from the initial listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    /// Item count announced by the site, before the resume offset
    pub site_total: u64,

    pub bounds: CrawlBounds,

    /// Paged listing endpoint, without query
    pub page_base_url: Url,
}

/// Fetches the initial listing page and derives the crawl bounds
///
/// This is the only request made before the first paged listing fetch.
///
/// # Errors
///
/// Every failure is a `DiscoveryError`: fetch failure, missing or
/// non-numeric counter, missing load-more control, zero page size, or a
/// resume index past the end of the listing.
pub async fn discover_bounds(
    fetcher: &dyn Fetcher,
    layout: &ListingLayout,
    resume: &ResumeState,
) -> Result<Discovery, DiscoveryError> {
    let body = fetcher.fetch(&layout.listing_url, &[]).await?;
    let listing = parse_initial_listing(&body, &layout.selectors);

    let counter = listing
        .counter_text
        .ok_or(DiscoveryError::MissingCounter)?;
    let site_total = parse_counter(&counter)?;

    let bounds = CrawlBounds::new(site_total, listing.item_count as u64, resume)?;

    let href = listing
        .load_more_href
        .ok_or(DiscoveryError::MissingLoadMore)?;
    // A bare query string targets the listing itself
    let path = strip_query(&href).trim();
    let page_base_url = if path.is_empty() {
        layout.listing_url.clone()
    } else {
        resolve_href(&layout.listing_url, path)
            .ok_or_else(|| DiscoveryError::InvalidPageBaseUrl(href.clone()))?
    };

    tracing::info!(
        "Listing has {} items, {} per page; {} remain after index {}",
        site_total,
        bounds.page_size(),
        bounds.total_items(),
        resume.start_from_idx()
    );

    Ok(Discovery {
        site_total,
        bounds,
        page_base_url,
    })
}

/// Walks the listing pages of one run
pub struct Paginator {
    fetcher: Arc<dyn Fetcher>,
    extractor: Extractor,
    layout: ListingLayout,
    discovery: Discovery,
    resume: ResumeState,
    item_concurrency: usize,
}

impl Paginator {
    /// Discovers the crawl bounds and creates the paginator
    ///
    /// Discovery happens exactly once; the result is kept for the whole run.
    pub async fn discover(
        fetcher: Arc<dyn Fetcher>,
        extractor: Extractor,
        layout: ListingLayout,
        resume: ResumeState,
        item_concurrency: usize,
    ) -> Result<Self, DiscoveryError> {
        let discovery = discover_bounds(fetcher.as_ref(), &layout, &resume).await?;
        Ok(Self::new(
            fetcher,
            extractor,
            layout,
            discovery,
            resume,
            item_concurrency,
        ))
    }

    /// Creates a paginator from an earlier discovery
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        extractor: Extractor,
        layout: ListingLayout,
        discovery: Discovery,
        resume: ResumeState,
        item_concurrency: usize,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            layout,
            discovery,
            resume,
            item_concurrency: item_concurrency.max(1),
        }
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    pub fn bounds(&self) -> &CrawlBounds {
        &self.discovery.bounds
    }

    /// `ceil(total_items / page_size)`
    pub fn total_pages(&self) -> u64 {
        self.bounds().total_pages()
    }

    /// Page indices visited by this run, ascending
    pub fn page_indices(&self) -> Range<u64> {
        self.bounds().page_indices(&self.resume)
    }

    /// Fetches a listing page and returns its item nodes in page order
    ///
    /// On the first page of the run the items before the resume index are
    /// dropped; every other page is returned whole.
    pub async fn items_on_page(&self, page_idx: u64) -> Result<Vec<ItemNode>, CrawlError> {
        let query = self.layout.page_query(page_idx);
        let body = self
            .fetcher
            .fetch(&self.discovery.page_base_url, &query)
            .await
            .map_err(|source| CrawlError::PageFetch {
                page: page_idx,
                source,
            })?;

        let mut nodes = parse_listing_items(
            &body,
            &self.layout.selectors.page_item,
            &self.layout.selectors.item_link,
        );

        let skip = self.bounds().items_to_skip(&self.resume, page_idx) as usize;
        if skip > 0 {
            nodes.drain(..skip.min(nodes.len()));
        }

        tracing::debug!(
            "Page {}: {} items ({} skipped)",
            page_idx,
            nodes.len(),
            skip
        );

        Ok(nodes)
    }

    /// Streams the remaining documents of the listing in site order
    ///
    /// At most `total_items` documents are produced. Detail pages of one
    /// listing page are fetched up to `item_concurrency` at a time, but
    /// documents are still yielded in node order. The stream ends at the
    /// first fatal error.
    ///
    /// A page that lists fewer items than expected is fatal unless it is the
    /// last page of the run: its items are yielded first, then
    /// `CrawlError::ShortPage` ends the stream, so the number of documents
    /// yielded is always a valid resume offset.
    pub fn proceed(&self) -> impl Stream<Item = Result<Document, CrawlError>> + '_ {
        try_stream! {
            let page_size = self.bounds().page_size().get();
            let mut remaining = self.bounds().total_items();
            let pages = self.page_indices();
            let last_page = pages.end.saturating_sub(1);

            for page_idx in pages {
                if remaining == 0 {
                    break;
                }

                let skip = self.bounds().items_to_skip(&self.resume, page_idx);
                let expected = (page_size - skip).min(remaining);

                let mut nodes = self.items_on_page(page_idx).await?;
                nodes.truncate(usize::try_from(expected).unwrap_or(usize::MAX));

                let got = nodes.len() as u64;
                let mut shortfall = None;
                if got < expected {
                    if page_idx == last_page {
                        tracing::warn!(
                            "Last page {} returned {} items, expected {}",
                            page_idx,
                            got,
                            expected
                        );
                    } else {
                        shortfall = Some(CrawlError::ShortPage {
                            page: page_idx,
                            got,
                            expected,
                        });
                    }
                }
                remaining -= got;

                let documents = stream::iter(nodes.into_iter().enumerate())
                    .map(|(i, node)| self.extractor.extract(node, page_idx, skip as usize + i))
                    .buffered(self.item_concurrency);
                pin_mut!(documents);

                while let Some(document) = documents.next().await {
                    yield document?;
                }

                if let Some(e) = shortfall {
                    Err::<(), CrawlError>(e)?;
                }
            }
        }
    }
}
