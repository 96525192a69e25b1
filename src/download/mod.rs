//! Download module for fetching photos to local storage
//!
//! This module contains the consumer side of the crawl:
//! - Work items and the shutdown marker carried by the queue
//! - The shared work queue with completion tracking
//! - The download worker loop and the fixed-size worker pool

mod pool;
mod queue;
mod worker;

pub use pool::DownloadPool;
pub use queue::WorkQueue;
pub use worker::{download_photo, run_worker, DownloadOutcome, WorkerSettings};

/// Extension of every photo the site serves
pub const PHOTO_EXTENSION: &str = "jpg";

/// A single photo to download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// Local name of the photo, without extension
    pub display_name: String,

    /// Absolute URL of the full-size image
    pub source_url: String,
}

impl WorkItem {
    pub fn new(display_name: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            source_url: source_url.into(),
        }
    }

    /// File name the photo is stored under
    pub fn filename(&self) -> String {
        format!("{}.{}", self.display_name, PHOTO_EXTENSION)
    }
}

/// An entry on the work queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
    /// A photo to download
    Work(WorkItem),

    /// No more work will arrive; the worker that takes this exits
    Shutdown,
}
