//! Crawler coordinator - main crawl orchestration logic
//!
//! This module wires the page walk to the download pool:
//! - Fetching the profile page and resolving the user id
//! - Starting the fixed pool of download workers
//! - Walking the feed, feeding the shared queue
//! - Shutting the workers down and waiting for the queue to drain

use crate::config::Config;
use crate::crawler::build_http_client;
use crate::crawler::paginator::Paginator;
use crate::download::{DownloadPool, WorkQueue, WorkerSettings};
use crate::output::{CrawlReport, DownloadStats};
use crate::state::CrawlState;
use crate::Result;
use chrono::Utc;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: Client,
    quiet: bool,
    dry_run: bool,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(RippleError)` - The HTTP client could not be built
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(&config.http)?;

        Ok(Self {
            config: Arc::new(config),
            client,
            quiet: false,
            dry_run: false,
        })
    }

    /// Suppresses per-file skip messages
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Walks the feed without downloading anything
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Runs a complete crawl for one user
    ///
    /// Only profile-level failures are returned as errors; in that case no
    /// worker has been started. Every later failure is logged where it
    /// happens and the run still shuts its workers down and drains the
    /// queue before returning the report.
    pub async fn run(&self, username: &str) -> Result<CrawlReport> {
        let started_at = Utc::now();
        let start_time = Instant::now();

        let mut paginator = Paginator::new(self.client.clone(), self.config.site.base())?;
        let page = paginator.open_profile(username).await?;

        let output_dir = PathBuf::from(&self.config.download.output_dir);
        if !self.dry_run {
            tokio::fs::create_dir_all(&output_dir).await?;
        }

        let queue = WorkQueue::new();
        let stats = Arc::new(DownloadStats::default());
        let pool = DownloadPool::start(
            self.config.download.workers,
            queue.clone(),
            self.client.clone(),
            WorkerSettings {
                output_dir,
                quiet: self.quiet,
                dry_run: self.dry_run,
            },
            Arc::clone(&stats),
        );

        let final_state = match paginator.walk(&page, &queue).await {
            Ok(state) => state,
            Err(e) => {
                tracing::error!("Feed walk stopped: {}", e);
                CrawlState::Aborted
            }
        };

        pool.shutdown();
        pool.join().await;

        let report = CrawlReport {
            username: page.profile.username,
            user_id: page.profile.internal_id,
            final_state,
            pages: paginator.pages(),
            items_queued: paginator.items(),
            downloads: stats.snapshot(),
            started_at,
            elapsed: start_time.elapsed(),
        };

        tracing::info!(
            "Crawl {} in {:?}: {} downloaded, {} skipped, {} failed",
            report.final_state,
            report.elapsed,
            report.downloads.downloaded,
            report.downloads.skipped,
            report.downloads.failed
        );

        Ok(report)
    }
}

/// Runs the main crawl operation
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `username` - The account whose photos are downloaded
/// * `quiet` - Suppress per-file skip messages
///
/// # Example
///
/// ```no_run
/// use photo_ripple::config::Config;
/// use photo_ripple::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = run_crawl(Config::default(), "someone", false).await?;
/// println!("{} photos queued", report.items_queued);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config, username: &str, quiet: bool) -> Result<CrawlReport> {
    Coordinator::new(config)?.with_quiet(quiet).run(username).await
}
