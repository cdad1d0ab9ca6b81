//! Crawler module for listing traversal and document extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing of listing and detail pages
//! - Bounds discovery, resume arithmetic and page iteration
//! - Per-item extraction with failure isolation
//! - Overall run coordination

mod coordinator;
mod extractor;
mod fetcher;
mod paginator;
mod parser;

#[cfg(test)]
mod testing;

pub use coordinator::{run_crawl, Coordinator};
pub use extractor::Extractor;
pub use fetcher::{build_http_client, Fetcher, HttpFetcher};
pub use paginator::{discover_bounds, Discovery, ListingLayout, Paginator};
pub use parser::{
    extract_text, parse_counter, parse_initial_listing, parse_listing_items, InitialListing,
    ItemNode, PageSelectors,
};
