//! Progress reporters
//!
//! `BarProgress` renders a terminal progress bar; `ProgressCounter` only
//! counts and is what tests and headless callers inject.

use crate::output::traits::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Terminal progress bar
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    /// Creates a progress bar drawn to stderr
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new(0),
        }
    }

    /// Creates a progress bar that never draws (quiet mode)
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarProgress {
    fn start(&self, total: u64) {
        self.bar.set_length(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.green/dim}] {pos}/{len} ({eta}) {msg}")
        {
            self.bar.set_style(style.progress_chars("█▓░"));
        }
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn tick(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}

/// Counting progress reporter
#[derive(Debug, Default)]
pub struct ProgressCounter {
    total: AtomicU64,
    ticks: AtomicU64,
    finished: AtomicBool,
}

impl ProgressCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total announced by the last `start`
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::SeqCst)
    }

    /// Documents recorded so far
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Whether `finish` was called
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

impl ProgressReporter for ProgressCounter {
    fn start(&self, total: u64) {
        self.total.store(total, Ordering::SeqCst);
    }

    fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }

    fn finish(&self) {
        self.finished.store(true, Ordering::SeqCst);
    }
}
