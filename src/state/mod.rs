//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlState`: the pagination state machine (start, walking, done, aborted)

mod crawl_state;

// Re-export main types
pub use crawl_state::CrawlState;
