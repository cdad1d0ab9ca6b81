//! Item extractor
//!
//! Resolves one listing item to a [`Document`]. A broken listing item is a
//! fatal `MalformedNode` error, while any failure on the item's detail page
//! only degrades that one document to "no text".

use crate::crawler::fetcher::Fetcher;
use crate::crawler::parser::{extract_text, ItemNode};
use crate::document::Document;
use crate::output::ProgressReporter;
use crate::url::resolve_href;
use crate::{CrawlError, ItemExtractionError};
use scraper::Selector;
use std::sync::Arc;
use url::Url;

/// Turns listing item nodes into documents
pub struct Extractor {
    fetcher: Arc<dyn Fetcher>,
    base_url: Url,
    text_selector: Selector,
    progress: Arc<dyn ProgressReporter>,
}

impl Extractor {
    /// Creates an extractor
    ///
    /// # Arguments
    ///
    /// * `fetcher` - Source of detail pages
    /// * `base_url` - URL item links are resolved against
    /// * `text_selector` - Region of the detail page holding the text
    /// * `progress` - Receives one tick per extracted document
    pub fn new(
        fetcher: Arc<dyn Fetcher>,
        base_url: Url,
        text_selector: Selector,
        progress: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            fetcher,
            base_url,
            text_selector,
            progress,
        }
    }

    /// Resolves an item node into a document
    ///
    /// `page` and `position` locate the node in the listing for error reports.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - With text, or without text if the detail page failed
    /// * `Err(CrawlError::MalformedNode)` - The node has no usable title link
    pub async fn extract(
        &self,
        node: ItemNode,
        page: u64,
        position: usize,
    ) -> Result<Document, CrawlError> {
        let href = node.link.ok_or_else(|| CrawlError::MalformedNode {
            page,
            position,
            reason: "item has no title link".to_string(),
        })?;

        let url = resolve_href(&self.base_url, &href).ok_or_else(|| CrawlError::MalformedNode {
            page,
            position,
            reason: format!("title link {:?} is not a document URL", href),
        })?;

        let text = match self.fetch_text(&url).await {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::warn!(
                    "No text for {} ({}): {}",
                    url,
                    node.title.as_deref().unwrap_or("untitled"),
                    e
                );
                None
            }
        };

        let document = Document::new(url, text);
        self.progress.tick();
        Ok(document)
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, ItemExtractionError> {
        let body = self.fetcher.fetch(url, &[]).await?;
        extract_text(&body, &self.text_selector).ok_or_else(|| ItemExtractionError::MissingText {
            url: url.to_string(),
        })
    }
}
