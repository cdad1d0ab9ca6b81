//! Crawl bounds discovered once per run
//!
//! `CrawlBounds` is computed from the initial listing page and never changes
//! for the rest of the run. All page arithmetic of the paginator lives here so
//! it can be checked without a network.

use crate::state::ResumeState;
use crate::DiscoveryError;
use std::num::NonZeroU64;
use std::ops::Range;

/// Remaining item count and page size of the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlBounds {
    total_items: u64,
    page_size: NonZeroU64,
}

impl CrawlBounds {
    /// Builds the bounds from the site's full item count and page size
    ///
    /// `total_items` of the result has the resume offset already subtracted.
    ///
    /// # Errors
    ///
    /// * `DiscoveryError::ZeroPageSize` - the listing page had no items
    /// * `DiscoveryError::ResumePastEnd` - the resume index lies beyond the listing
    pub fn new(
        site_total: u64,
        page_size: u64,
        resume: &ResumeState,
    ) -> Result<Self, DiscoveryError> {
        let page_size = NonZeroU64::new(page_size).ok_or(DiscoveryError::ZeroPageSize)?;

        let total_items = site_total.checked_sub(resume.start_from_idx()).ok_or(
            DiscoveryError::ResumePastEnd {
                start_from_idx: resume.start_from_idx(),
                site_total,
            },
        )?;

        Ok(Self {
            total_items,
            page_size,
        })
    }

    /// Items remaining after the resume offset
    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of items per listing page
    pub fn page_size(&self) -> NonZeroU64 {
        self.page_size
    }

    /// Pages needed to hold the remaining items, `ceil(total_items / page_size)`
    pub fn total_pages(&self) -> u64 {
        let page_size = self.page_size.get();
        (self.total_items + page_size - 1) / page_size
    }

    /// Pages the run actually visits
    ///
    /// The first visited page is only partially consumed when the resume
    /// index falls mid-page, so the span covers item indices
    /// `start_from_idx..start_from_idx + total_items` rather than
    /// `total_pages()` whole pages.
    pub fn pages_to_visit(&self, resume: &ResumeState) -> u64 {
        if self.total_items == 0 {
            return 0;
        }
        let page_size = self.page_size.get();
        let offset = resume.start_in_page_offset(self.page_size);
        (offset + self.total_items + page_size - 1) / page_size
    }

    /// Page indices of the run in visiting order
    pub fn page_indices(&self, resume: &ResumeState) -> Range<u64> {
        let start = resume.start_page_idx(self.page_size);
        start..start + self.pages_to_visit(resume)
    }

    /// Items to drop from the front of `page_idx` before extraction
    ///
    /// Non-zero only on the first page of the run.
    pub fn items_to_skip(&self, resume: &ResumeState, page_idx: u64) -> u64 {
        if page_idx == resume.start_page_idx(self.page_size) {
            resume.start_in_page_offset(self.page_size)
        } else {
            0
        }
    }
}
