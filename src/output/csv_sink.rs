//! CSV document sink
//!
//! Rows are `(url, text)` without a header. The file is opened in append mode
//! so a resumed run continues the file a previous run left behind, and every
//! row is flushed as soon as it is written.

use crate::document::Document;
use crate::output::traits::{DocumentSink, OutputResult};
use csv::{Writer, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Appends documents to a CSV file
pub struct CsvSink {
    writer: Writer<File>,
}

impl CsvSink {
    /// Opens (or creates) the CSV file in append mode
    pub fn open(path: impl AsRef<Path>) -> OutputResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let writer = WriterBuilder::new().has_headers(false).from_writer(file);

        tracing::info!("Appending documents to {}", path.display());

        Ok(Self { writer })
    }
}

impl DocumentSink for CsvSink {
    fn append(&mut self, document: &Document) -> OutputResult<()> {
        self.writer.serialize(document)?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
