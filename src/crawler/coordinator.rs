//! Crawler coordinator - run orchestration
//!
//! This module sequences one crawl run:
//! - Discovering the crawl bounds from the initial listing
//! - Streaming documents from the paginator into the sink
//! - Reporting progress and summarizing the run
//!
//! When a run aborts, the log names the `--start-from-idx` value that picks
//! up right after the last document that reached the sink.

use crate::config::{validate, Config};
use crate::crawler::extractor::Extractor;
use crate::crawler::fetcher::{Fetcher, HttpFetcher};
use crate::crawler::paginator::{discover_bounds, Discovery, ListingLayout, Paginator};
use crate::output::{BarProgress, CsvSink, DocumentSink, ProgressReporter, RunSummary};
use crate::state::ResumeState;
use crate::{ConfigError, CrawlError};
use futures::{pin_mut, StreamExt};
use std::sync::Arc;
use url::Url;

/// Main crawl coordinator structure
pub struct Coordinator {
    config: Config,
    resume: ResumeState,
    fetcher: Arc<dyn Fetcher>,
    progress: Arc<dyn ProgressReporter>,
}

impl Coordinator {
    /// Creates a coordinator fetching over HTTP
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `resume` - Where in the listing the run starts
    /// * `progress` - Progress reporter ticked once per document
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - Invalid configuration or HTTP client setup failure
    pub fn new(
        config: Config,
        resume: ResumeState,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(&config.http).map_err(ConfigError::HttpClient)?;
        Self::with_fetcher(config, resume, Arc::new(fetcher), progress)
    }

    /// Creates a coordinator with a custom fetcher
    pub fn with_fetcher(
        config: Config,
        resume: ResumeState,
        fetcher: Arc<dyn Fetcher>,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<Self, CrawlError> {
        validate(&config)?;
        Ok(Self {
            config,
            resume,
            fetcher,
            progress,
        })
    }

    /// Discovers the crawl bounds without fetching any listing page
    pub async fn plan(&self) -> Result<Discovery, CrawlError> {
        let layout = ListingLayout::from_config(&self.config)?;
        Ok(discover_bounds(self.fetcher.as_ref(), &layout, &self.resume).await?)
    }

    /// Runs the crawl, appending every document to `sink`
    ///
    /// # Returns
    ///
    /// * `Ok(RunSummary)` - Every remaining document was written
    /// * `Err(CrawlError)` - The run aborted; documents written so far stay in the sink
    pub async fn run(&self, sink: &mut dyn DocumentSink) -> Result<RunSummary, CrawlError> {
        let layout = ListingLayout::from_config(&self.config)?;
        let base_url = Url::parse(&self.config.site.base_url)?;
        let extractor = Extractor::new(
            self.fetcher.clone(),
            base_url,
            layout.selectors.detail_text.clone(),
            self.progress.clone(),
        );

        let paginator = Paginator::discover(
            self.fetcher.clone(),
            extractor,
            layout,
            self.resume,
            self.config.crawler.item_concurrency,
        )
        .await?;

        let bounds = *paginator.bounds();
        let pages = paginator.page_indices();
        tracing::info!(
            "Starting at index {} (page {}, offset {}), visiting pages {}..{}",
            self.resume.start_from_idx(),
            pages.start,
            self.resume.start_in_page_offset(bounds.page_size()),
            pages.start,
            pages.end
        );

        self.progress.start(bounds.total_items());
        let mut summary = RunSummary::new(self.resume.start_from_idx(), bounds.total_items());

        if let Err(e) = drain(&paginator, sink, &mut summary).await {
            tracing::error!(
                "Crawl aborted after {} documents: {}. Resume with --start-from-idx {}",
                summary.documents_written,
                e,
                summary.next_start_idx()
            );
            return Err(e);
        }

        sink.finish()?;
        self.progress.finish();
        summary.finish();

        tracing::info!(
            "Crawl completed: {} documents written ({} without text)",
            summary.documents_written,
            summary.documents_without_text
        );

        Ok(summary)
    }
}

async fn drain(
    paginator: &Paginator,
    sink: &mut dyn DocumentSink,
    summary: &mut RunSummary,
) -> Result<(), CrawlError> {
    let documents = paginator.proceed();
    pin_mut!(documents);

    while let Some(document) = documents.next().await {
        let document = document?;
        sink.append(&document)?;
        summary.record(&document);
    }

    Ok(())
}

/// Runs a crawl into the configured CSV file
///
/// # Example
///
/// ```no_run
/// use acts_harvester::config::Config;
/// use acts_harvester::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_crawl(Config::default(), 0, false).await?;
/// println!("{} documents written", summary.documents_written);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(
    config: Config,
    start_from_idx: u64,
    quiet: bool,
) -> Result<RunSummary, CrawlError> {
    let progress: Arc<dyn ProgressReporter> = if quiet {
        Arc::new(BarProgress::hidden())
    } else {
        Arc::new(BarProgress::new())
    };

    let csv_path = config.output.csv_path.clone();
    let coordinator = Coordinator::new(config, ResumeState::new(start_from_idx), progress)?;
    let mut sink = CsvSink::open(&csv_path)?;
    coordinator.run(&mut sink).await
}
