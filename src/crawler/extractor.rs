//! Page extraction: gallery entries to work items
//!
//! For each entry on a page, in document order, the extractor derives the
//! display name, expands series into their member photos with a second
//! fetch, and puts the resulting work items on the queue. The id of the
//! page's last entry is returned as the cursor for the next page.

use crate::crawler::parser::{parse_gallery_entries, parse_series_photos, GalleryEntry};
use crate::crawler::{fetch_url, FetchResult};
use crate::download::{WorkItem, WorkQueue};
use crate::naming::{display_name, series_member_name};
use crate::Result;
use reqwest::Client;
use url::Url;

/// What one page contributed to the queue
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageExtraction {
    /// Id of the last entry on the page; `None` for an empty page
    pub cursor: Option<String>,

    /// Number of entries found on the page
    pub entries: usize,

    /// Number of work items queued
    pub items: usize,
}

/// Turns gallery pages into queued work items
#[derive(Debug, Clone)]
pub struct PageExtractor {
    client: Client,
    base_url: Url,
}

impl PageExtractor {
    /// Creates an extractor resolving relative series links against `base_url`
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Extracts every entry of a page onto the queue
    ///
    /// Series fetch failures are logged and contribute no items; they never
    /// stop the extraction of the remaining entries.
    pub async fn extract(&self, html: &str, queue: &WorkQueue) -> PageExtraction {
        let entries = parse_gallery_entries(html);
        let mut items = 0;

        for entry in &entries {
            let name = display_name(&entry.id, &entry.title);

            if entry.is_series {
                let urls = self.series_photos(entry).await;
                for (index, url) in urls.into_iter().enumerate() {
                    queue.put_work(WorkItem::new(series_member_name(&name, index + 1), url));
                    items += 1;
                }
            } else {
                match &entry.large_url {
                    Some(url) => {
                        queue.put_work(WorkItem::new(name, url.clone()));
                        items += 1;
                    }
                    None => tracing::warn!("Photo {} has no large image URL, skipping", entry.id),
                }
            }
        }

        tracing::debug!("Extracted {} items from {} entries", items, entries.len());

        PageExtraction {
            cursor: entries.last().map(|entry| entry.id.clone()),
            entries: entries.len(),
            items,
        }
    }

    /// Fetches a series page and returns its photo URLs in display order
    async fn series_photos(&self, entry: &GalleryEntry) -> Vec<String> {
        let Some(href) = entry.href.as_deref() else {
            tracing::warn!("Series {} has no link, skipping", entry.id);
            return Vec::new();
        };

        let series_url = match self.base_url.join(href) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid series link {} for {}: {}", href, entry.id, e);
                return Vec::new();
            }
        };

        let html = match fetch_url(&self.client, series_url.as_str()).await {
            FetchResult::Success { body, .. } => String::from_utf8_lossy(&body).into_owned(),
            failure => {
                tracing::warn!("Failed to get {} - {}", series_url, failure.describe());
                return Vec::new();
            }
        };

        match parse_series_photos(&html) {
            Ok(urls) => {
                tracing::debug!("Series {} has {} photos", entry.id, urls.len());
                urls
            }
            Err(message) => {
                tracing::warn!("Could not read series {}: {}", series_url, message);
                Vec::new()
            }
        }
    }
}
