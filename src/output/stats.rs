//! Download counters shared across workers

use crate::download::DownloadOutcome;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counters updated by every worker
#[derive(Debug, Default)]
pub struct DownloadStats {
    downloaded: AtomicU64,
    skipped: AtomicU64,
    planned: AtomicU64,
    failed: AtomicU64,
    bytes: AtomicU64,
}

/// Point-in-time copy of [`DownloadStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadSnapshot {
    pub downloaded: u64,
    pub skipped: u64,
    pub planned: u64,
    pub failed: u64,
    pub bytes: u64,
}

impl DownloadSnapshot {
    /// Number of work items handled, whatever the outcome
    pub fn total(&self) -> u64 {
        self.downloaded + self.skipped + self.planned + self.failed
    }
}

impl DownloadStats {
    /// Counts one work item outcome
    pub fn record(&self, outcome: &DownloadOutcome) {
        match outcome {
            DownloadOutcome::Downloaded { bytes } => {
                self.downloaded.fetch_add(1, Ordering::Relaxed);
                self.bytes.fetch_add(*bytes, Ordering::Relaxed);
            }
            DownloadOutcome::Skipped => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
            DownloadOutcome::Planned => {
                self.planned.fetch_add(1, Ordering::Relaxed);
            }
            DownloadOutcome::Failed { .. } => {
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self) -> DownloadSnapshot {
        DownloadSnapshot {
            downloaded: self.downloaded.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            planned: self.planned.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            bytes: self.bytes.load(Ordering::Relaxed),
        }
    }
}
