//! Download worker implementation
//!
//! Each worker repeatedly takes one item from the shared queue and either
//! exits (shutdown marker) or downloads a single photo. A photo whose file
//! already exists is skipped, which makes re-running a crawl over the same
//! output directory fetch only the missing files.
//!
//! The existence check and the write are not atomic. Two workers given the
//! same file name can both download it; the last write wins.

use crate::crawler::{fetch_url, FetchResult};
use crate::download::{QueueItem, WorkItem, WorkQueue};
use crate::output::DownloadStats;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;

/// Per-run settings shared by every worker
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    /// Directory photos are written to
    pub output_dir: PathBuf,

    /// Suppress skip messages
    pub quiet: bool,

    /// Log what would be downloaded without fetching or writing
    pub dry_run: bool,
}

/// Result of handling one work item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The photo was fetched and written
    Downloaded { bytes: u64 },

    /// A file with the target name already existed
    Skipped,

    /// Dry run: nothing was fetched
    Planned,

    /// The fetch or the write failed
    Failed { reason: String },
}

/// Runs one worker until it takes a shutdown marker
///
/// Every item taken from the queue is acknowledged exactly once, whatever
/// its outcome, so [`WorkQueue::join`] terminates.
pub async fn run_worker(
    worker_id: usize,
    queue: WorkQueue,
    client: Client,
    settings: Arc<WorkerSettings>,
    stats: Arc<DownloadStats>,
) {
    tracing::debug!("Worker {} started", worker_id);

    loop {
        let item = match queue.get().await {
            QueueItem::Shutdown => {
                queue.task_done();
                break;
            }
            QueueItem::Work(item) => item,
        };

        let outcome = download_photo(&client, &item, &settings).await;
        stats.record(&outcome);
        queue.task_done();
    }

    tracing::debug!("Worker {} stopped", worker_id);
}

/// Downloads a single photo unless its file already exists
///
/// Failures are logged and reported in the outcome; they never stop the
/// worker and are not retried.
pub async fn download_photo(
    client: &Client,
    item: &WorkItem,
    settings: &WorkerSettings,
) -> DownloadOutcome {
    let filename = item.filename();
    let path = settings.output_dir.join(&filename);

    match tokio::fs::try_exists(&path).await {
        Ok(true) => {
            if settings.quiet {
                tracing::debug!("{} already exists, skipping", filename);
            } else {
                tracing::info!("{} already exists, skipping", filename);
            }
            return DownloadOutcome::Skipped;
        }
        Ok(false) => {}
        Err(e) => {
            tracing::warn!("Could not check {}: {}", path.display(), e);
            return DownloadOutcome::Failed {
                reason: e.to_string(),
            };
        }
    }

    if settings.dry_run {
        tracing::info!("Would download {} from {}", filename, item.source_url);
        return DownloadOutcome::Planned;
    }

    match fetch_url(client, &item.source_url).await {
        FetchResult::Success { body, .. } => match tokio::fs::write(&path, &body).await {
            Ok(()) => {
                tracing::debug!("Saved {} ({} bytes)", filename, body.len());
                DownloadOutcome::Downloaded {
                    bytes: body.len() as u64,
                }
            }
            Err(e) => {
                tracing::warn!("Failed to write {}: {}", path.display(), e);
                DownloadOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        },
        failure => {
            let reason = failure.describe();
            tracing::warn!(
                "Failed to download {} from {} - {}",
                filename,
                item.source_url,
                reason
            );
            DownloadOutcome::Failed { reason }
        }
    }
}
