//! Acts-Harvester: a resumable listing crawler
//!
//! This crate walks a paginated result listing, resolves every listed item to
//! its detail page, extracts the document text and appends one record per item
//! to a CSV file. A run can be resumed from any item offset of a previous,
//! partially completed run.

pub mod config;
pub mod crawler;
pub mod document;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for a crawl run
///
/// Every variant is fatal for the run. Per-item failures never surface here;
/// they are recorded as documents without text.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Bounds discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Malformed listing item #{position} on page {page}: {reason}")]
    MalformedNode {
        page: u64,
        position: usize,
        reason: String,
    },

    #[error("Failed to fetch listing page {page}: {source}")]
    PageFetch { page: u64, source: FetchError },

    #[error("Listing page {page} returned {got} items, expected {expected}")]
    ShortPage { page: u64, got: u64, expected: u64 },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),
}

/// Errors raised while discovering the crawl bounds from the initial listing
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("Initial listing fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Total-count label not found on the initial listing page")]
    MissingCounter,

    #[error("Total-count label is not a number: {0:?}")]
    UnparsableCounter(String),

    #[error("Initial listing page has no items, page size would be zero")]
    ZeroPageSize,

    #[error("Load-more control (or its URL attribute) not found on the initial listing page")]
    MissingLoadMore,

    #[error("Invalid paged listing URL {0:?}")]
    InvalidPageBaseUrl(String),

    #[error("Resume index {start_from_idx} is past the end of the listing ({site_total} items)")]
    ResumePastEnd { start_from_idx: u64, site_total: u64 },
}

/// Transport errors reported by a fetcher after its own retry policy gave up
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },
}

/// Failure to read one item's detail page
///
/// Scoped to a single item. The extractor turns it into a document without
/// text and logs it; it is never propagated further.
#[derive(Debug, Error)]
pub enum ItemExtractionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No text region found on {url}")]
    MissingText { url: String },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector: {0}")]
    InvalidSelector(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Result type alias for crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator};
pub use document::Document;
pub use state::{CrawlBounds, ResumeState};
