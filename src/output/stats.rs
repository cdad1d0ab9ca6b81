//! Run summary
//!
//! Counts what a run wrote and tells the operator where the next run has to
//! resume.

use crate::document::Document;
use chrono::{DateTime, Utc};

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Resume index the run was started with
    pub start_from_idx: u64,

    /// Documents the run expected to produce
    pub planned_items: u64,

    /// Documents appended to the sink
    pub documents_written: u64,

    /// Documents appended without text
    pub documents_without_text: u64,

    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    /// Starts a summary for a run resuming at `start_from_idx`
    pub fn new(start_from_idx: u64, planned_items: u64) -> Self {
        Self {
            start_from_idx,
            planned_items,
            documents_written: 0,
            documents_without_text: 0,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Records one document appended to the sink
    pub fn record(&mut self, document: &Document) {
        self.documents_written += 1;
        if document.is_degraded() {
            self.documents_without_text += 1;
        }
    }

    /// Marks the run as finished
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// `--start-from-idx` value that continues right after the last written document
    pub fn next_start_idx(&self) -> u64 {
        self.start_from_idx + self.documents_written
    }

    /// Returns true if every planned document was written
    pub fn is_complete(&self) -> bool {
        self.documents_written >= self.planned_items
    }

    /// Run duration in seconds, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Crawl Summary ===\n");

    println!("  Started from index: {}", summary.start_from_idx);
    println!("  Planned documents: {}", summary.planned_items);
    println!("  Documents written: {}", summary.documents_written);

    let degraded_rate = if summary.documents_written > 0 {
        (summary.documents_without_text as f64 / summary.documents_written as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "  Without text: {} ({:.1}%)",
        summary.documents_without_text, degraded_rate
    );

    if let Some(seconds) = summary.duration_seconds() {
        println!("  Duration: {}s", seconds);
    }

    if !summary.is_complete() {
        println!(
            "\nRun incomplete, resume with --start-from-idx {}",
            summary.next_start_idx()
        );
    }
}
