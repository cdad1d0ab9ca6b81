use serde::Deserialize;

/// Main configuration structure for Acts-Harvester
///
/// Every section is optional in the TOML file; missing keys fall back to the
/// Bank of Russia legal acts listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub selectors: SelectorConfig,
    pub paging: PagingConfig,
    pub http: HttpConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Location of the listing on the remote site
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root URL every relative link is resolved against
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the initial (unpaged) listing, relative to `base-url`
    #[serde(rename = "listing-path")]
    pub listing_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.cbr.ru/".to_string(),
            listing_path: "na/".to_string(),
        }
    }
}

/// CSS selectors describing the listing and detail page structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Element whose text starts with the total item count
    pub counter: String,

    /// The "load more" control carrying the paged listing URL
    #[serde(rename = "load-more")]
    pub load_more: String,

    /// Attribute of the load-more control holding the paged listing URL
    #[serde(rename = "load-more-attr")]
    pub load_more_attr: String,

    /// Item nodes on the initial listing page (their count is the page size)
    #[serde(rename = "initial-item")]
    pub initial_item: String,

    /// Item nodes on a paged listing response
    #[serde(rename = "page-item")]
    pub page_item: String,

    /// Title link inside an item node
    #[serde(rename = "item-link")]
    pub item_link: String,

    /// Region of the detail page holding the document text
    #[serde(rename = "detail-text")]
    pub detail_text: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            counter: "div.results div.results_counter".to_string(),
            load_more: "#la_load".to_string(),
            load_more_attr: "data-cross-ajax-url".to_string(),
            initial_item: "#content > div > div > div > div.cross-results > div.cross-result"
                .to_string(),
            page_item: "div.cross-result".to_string(),
            item_link: "div.title-source > div.title a".to_string(),
            detail_text: "#content".to_string(),
        }
    }
}

/// Query parameters of a paged listing request
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PagingConfig {
    /// Name of the 0-based page index parameter
    #[serde(rename = "page-param")]
    pub page_param: String,

    /// Name of the date filter parameter
    #[serde(rename = "filter-param")]
    pub filter_param: String,

    /// Value selecting "any date"
    #[serde(rename = "filter-value")]
    pub filter_value: String,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            page_param: "Page".to_string(),
            filter_param: "Date.Time".to_string(),
            filter_value: "Any".to_string(),
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// Retries after a 5xx response or a timeout
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Delay between retries (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("acts-harvester/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            max_retries: 3,
            retry_delay_ms: 5000,
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Detail pages fetched concurrently within one listing page
    #[serde(rename = "item-concurrency")]
    pub item_concurrency: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            item_concurrency: 1,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file the documents are appended to
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "legal_acts.csv".to_string(),
        }
    }
}
