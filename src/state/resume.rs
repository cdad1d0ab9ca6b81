//! Resume point of a crawl run
//!
//! `start_from_idx` counts items in full site order, so a run that wrote N
//! records is continued by a run started with `start_from_idx = N`.

use std::num::NonZeroU64;

/// Where in the listing a run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResumeState {
    start_from_idx: u64,
}

impl ResumeState {
    /// Creates a resume point skipping the first `start_from_idx` items
    pub fn new(start_from_idx: u64) -> Self {
        Self { start_from_idx }
    }

    /// Number of items (in site order) skipped before this run
    pub fn start_from_idx(&self) -> u64 {
        self.start_from_idx
    }

    /// Index of the listing page holding the first item of this run
    pub fn start_page_idx(&self, page_size: NonZeroU64) -> u64 {
        self.start_from_idx / page_size.get()
    }

    /// Position of the first item of this run within its page
    ///
    /// Always in `0..page_size`.
    pub fn start_in_page_offset(&self, page_size: NonZeroU64) -> u64 {
        self.start_from_idx % page_size.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: u64) -> NonZeroU64 {
        NonZeroU64::new(n).unwrap()
    }

    #[test]
    fn test_default_starts_at_zero() {
        let resume = ResumeState::default();
        assert_eq!(resume.start_from_idx(), 0);
        assert_eq!(resume.start_page_idx(size(20)), 0);
        assert_eq!(resume.start_in_page_offset(size(20)), 0);
    }

    #[test]
    fn test_mid_page_resume() {
        let resume = ResumeState::new(25);
        assert_eq!(resume.start_page_idx(size(20)), 1);
        assert_eq!(resume.start_in_page_offset(size(20)), 5);
    }

    #[test]
    fn test_page_boundary_resume_drops_nothing() {
        let resume = ResumeState::new(40);
        assert_eq!(resume.start_page_idx(size(20)), 2);
        assert_eq!(resume.start_in_page_offset(size(20)), 0);
    }

    #[test]
    fn test_offset_always_within_page() {
        for page_size in 1..=12 {
            for start in 0..100 {
                let resume = ResumeState::new(start);
                let page = resume.start_page_idx(size(page_size));
                let offset = resume.start_in_page_offset(size(page_size));

                assert!(offset < page_size);
                assert_eq!(page * page_size + offset, start);
            }
        }
    }
}
