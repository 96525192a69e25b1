//! Output module for run statistics and the end-of-run report
//!
//! - `DownloadStats`: counters shared by the download workers
//! - `CrawlReport`: what a finished run did, printed by the binary

mod stats;

pub use stats::{DownloadSnapshot, DownloadStats};

use crate::state::CrawlState;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of a finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Account name given on the command line
    pub username: String,

    /// Numeric user id resolved from the profile page
    pub user_id: String,

    /// State the page walk ended in
    pub final_state: CrawlState,

    /// Number of feed pages processed, including the profile page
    pub pages: usize,

    /// Number of photos queued for download
    pub items_queued: usize,

    /// Worker results
    pub downloads: DownloadSnapshot,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

/// Prints a crawl report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Photo-Ripple Summary ===\n");
    println!("User: {} (id {})", report.username, report.user_id);
    println!(
        "Started: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Elapsed: {:.1}s", report.elapsed.as_secs_f64());
    println!("Feed walk: {} after {} page(s)", report.final_state, report.pages);
    println!();
    println!("Photos queued: {}", report.items_queued);
    println!("  Downloaded: {}", report.downloads.downloaded);
    println!("  Skipped (already present): {}", report.downloads.skipped);
    if report.downloads.planned > 0 {
        println!("  Planned (dry run): {}", report.downloads.planned);
    }
    println!("  Failed: {}", report.downloads.failed);
    println!("Bytes written: {}", report.downloads.bytes);
}
