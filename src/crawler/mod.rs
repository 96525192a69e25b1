//! Crawler module for walking a photo feed
//!
//! This module contains the producer side of the crawl, including:
//! - HTTP fetching with the site's expected headers
//! - HTML parsing of gallery entries, series data and the feed link
//! - Page extraction into work items
//! - The sequential page walk
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod paginator;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use extractor::{PageExtraction, PageExtractor};
pub use fetcher::{
    build_http_client, default_headers, fetch_url, fetch_url_with_query, FetchResult,
};
pub use paginator::{Paginator, ProfilePage, UserProfile, NEXT_PAGE_PATH};
pub use parser::{
    extract_user_id, parse_gallery_entries, parse_next_page, parse_series_photos, GalleryEntry,
    NextPage,
};
