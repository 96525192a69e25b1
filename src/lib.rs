//! Photo-Ripple: a paginated photo-gallery downloader
//!
//! This crate walks a user's photo feed page by page, expands photo series
//! into their member photos, and downloads every photo with a fixed pool of
//! concurrent workers, skipping files that already exist locally.

pub mod config;
pub mod crawler;
pub mod download;
pub mod naming;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Photo-Ripple operations
#[derive(Debug, Error)]
pub enum RippleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch profile page {url}: {reason}")]
    ProfileUnavailable { url: String, reason: String },

    #[error("No RSS feed link with a user id found on the profile page of '{username}'")]
    MissingUserId { username: String },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlState,
        to: state::CrawlState,
    },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Photo-Ripple operations
pub type Result<T> = std::result::Result<T, RippleError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator};
pub use download::{QueueItem, WorkItem, WorkQueue};
pub use naming::{display_name, sanitize};
pub use output::{CrawlReport, DownloadStats};
pub use state::CrawlState;
