//! Configuration module for Photo-Ripple
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section has defaults, so a run without a file
//! uses [`Config::default`].
//!
//! # Example
//!
//! ```no_run
//! use photo_ripple::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("ripple.toml")).unwrap();
//! println!("Downloading with {} workers", config.download.workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DownloadConfig, HttpConfig, SiteConfig, DEFAULT_BASE_URL, DEFAULT_WORKERS,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default};
pub use validation::validate;
