//! Output module for crawl results
//!
//! This module handles:
//! - Appending documents to the CSV output file
//! - Reporting progress while the crawl runs
//! - Summarizing a finished (or aborted) run

mod csv_sink;
mod progress;
pub mod stats;
mod traits;

pub use csv_sink::CsvSink;
pub use progress::{BarProgress, ProgressCounter};
pub use stats::{print_summary, RunSummary};
pub use traits::{DocumentSink, OutputError, OutputResult, ProgressReporter};
