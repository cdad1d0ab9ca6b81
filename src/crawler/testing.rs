//! In-memory fetcher and synthetic listing site for unit tests

use crate::crawler::fetcher::Fetcher;
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

pub const SITE: &str = "https://acts.example.com/";
pub const LISTING: &str = "https://acts.example.com/na/";
pub const PAGED: &str = "https://acts.example.com/na/more";

/// Serves fixed bodies keyed by full request URL, 404 for anything else
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub fn with_query_page(self, url: &str, query: &[(String, String)], body: &str) -> Self {
        let key = request_key(&Url::parse(url).unwrap(), query);
        self.with_page(&key, body)
    }

    pub fn without_query_page(mut self, url: &str, query: &[(String, String)]) -> Self {
        let key = request_key(&Url::parse(url).unwrap(), query);
        self.pages.remove(&key);
        self
    }

    /// Every URL requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &Url, query: &[(String, String)]) -> Result<String, FetchError> {
        let key = request_key(url, query);
        self.requests.lock().unwrap().push(key.clone());
        self.pages.get(&key).cloned().ok_or(FetchError::Status {
            url: key,
            status: 404,
        })
    }
}

fn request_key(url: &Url, query: &[(String, String)]) -> String {
    let mut url = url.clone();
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    url.to_string()
}

/// Query of a paged listing request with the default paging parameters
pub fn page_query(page_idx: u64) -> Vec<(String, String)> {
    vec![
        ("Date.Time".to_string(), "Any".to_string()),
        ("Page".to_string(), page_idx.to_string()),
    ]
}

pub fn detail_url(idx: usize) -> String {
    format!("{}acts/{}", SITE, idx)
}

fn item_html(idx: usize) -> String {
    format!(
        r#"<div class="cross-result"><div class="title-source"><div class="title"><a href="/acts/{idx}">Act {idx}</a></div></div></div>"#
    )
}

fn listing_body(items: std::ops::Range<usize>, counter: &str) -> String {
    let items: String = items.map(item_html).collect();
    format!(
        r#"<html><body>
        <div class="results"><div class="results_counter">{counter}</div></div>
        <div id="content"><div><div><div><div class="cross-results">{items}</div></div></div></div></div>
        <button id="la_load" data-cross-ajax-url="/na/more?Page=1&amp;Date.Time=Any">More</button>
        </body></html>"#
    )
}

/// Paged listing response holding the items in `items`
pub fn page_body(items: std::ops::Range<usize>) -> String {
    listing_body(items, "")
}

/// Builds a listing of `total` items, `page_size` per page
///
/// Detail pages of the indices in `failing` are missing and answer 404.
pub fn listing_site(total: usize, page_size: usize, failing: &[usize]) -> StaticFetcher {
    let first_page = 0..page_size.min(total);
    let mut fetcher = StaticFetcher::new().with_page(
        LISTING,
        &listing_body(first_page, &format!("{} documents", total)),
    );

    let pages = (total + page_size - 1) / page_size;
    for page in 0..pages {
        let items = page * page_size..((page + 1) * page_size).min(total);
        fetcher = fetcher.with_query_page(PAGED, &page_query(page as u64), &listing_body(items, ""));
    }

    for idx in (0..total).filter(|idx| !failing.contains(idx)) {
        fetcher = fetcher.with_page(
            &detail_url(idx),
            &format!(r#"<html><body><div id="content"><p>Text of act {idx}</p></div></body></html>"#),
        );
    }

    fetcher
}

/// Listing page whose counter reads `counter`
pub fn listing_with_counter(counter: &str, items: usize) -> StaticFetcher {
    StaticFetcher::new().with_page(LISTING, &listing_body(0..items, counter))
}
