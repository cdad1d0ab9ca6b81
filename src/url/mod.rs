//! URL handling module for Acts-Harvester
//!
//! Listing pages carry relative links; everything the crawler fetches or
//! writes is first resolved to an absolute http(s) URL here.

mod resolve;

// Re-export main functions
pub use resolve::{resolve_href, strip_query};
