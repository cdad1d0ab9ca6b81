//! State module for tracking where a crawl run starts and ends
//!
//! # Components
//!
//! - `ResumeState`: the item offset a run resumes from
//! - `CrawlBounds`: remaining item count and page size, discovered once per run

mod bounds;
mod resume;

// Re-export main types
pub use bounds::CrawlBounds;
pub use resume::ResumeState;
