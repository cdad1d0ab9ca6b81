//! Output handler traits and error types
//!
//! This module defines the sink documents are appended to and the progress
//! reporter the crawl ticks once per document.

use crate::document::Document;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Append-only destination for documents
///
/// Documents arrive in site order and exactly once each.
pub trait DocumentSink {
    /// Appends one document
    fn append(&mut self, document: &Document) -> OutputResult<()>;

    /// Flushes anything still buffered at the end of a run
    fn finish(&mut self) -> OutputResult<()> {
        Ok(())
    }
}

impl DocumentSink for Vec<Document> {
    fn append(&mut self, document: &Document) -> OutputResult<()> {
        self.push(document.clone());
        Ok(())
    }
}

/// Observer of crawl progress
///
/// Purely observational: the crawl never reads anything back from it.
pub trait ProgressReporter: Send + Sync {
    /// Announces the number of documents the run expects to produce
    fn start(&self, total: u64);

    /// Records one produced document
    fn tick(&self);

    /// Signals the end of the run
    fn finish(&self);
}
