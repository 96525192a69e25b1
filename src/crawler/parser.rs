//! HTML parser for gallery pages
//!
//! This module handles parsing page content to extract:
//! - Gallery entries (single photos and series) from profile pages and
//!   next-page fragments
//! - The numeric user id from the profile's RSS feed link
//! - The photo list embedded in a series page's inline script
//! - The next-page endpoint's JSON payload
//!
//! Everything returned is owned data. Parsed documents never outlive the
//! function that built them, so callers can hold results across awaits.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

/// Script assignment that holds a series' photo data
const PHOTO_DATA_MARKER: &str = "photoData = ";

/// One listed photo or photo series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryEntry {
    /// Server photo id, also used as the pagination cursor
    pub id: String,

    /// Full-size image URL (`href-large`)
    pub large_url: Option<String>,

    /// Link to the photo or series page (`href`)
    pub href: Option<String>,

    /// Raw title from the thumbnail, empty when absent
    pub title: String,

    /// True when the entry is a series that needs a second fetch
    pub is_series: bool,
}

/// Payload of the next-page endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct NextPage {
    /// HTML fragment with the next block of entries; empty at end of feed
    #[serde(default)]
    pub data: String,
}

impl NextPage {
    /// True when the server has no more entries
    pub fn is_end(&self) -> bool {
        self.data.trim().is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct PhotoData {
    #[serde(default)]
    series: Vec<SeriesPhoto>,
}

#[derive(Debug, Deserialize)]
struct SeriesPhoto {
    src: String,
}

/// Parses every gallery entry on a page, in document order
///
/// Entries are `<a class="item">` elements carrying `photo-id`,
/// `href-large` and `href` attributes, with the title on the nested
/// `<img>`. Anchors without a `photo-id` are skipped.
///
/// # Example
///
/// ```
/// use photo_ripple::crawler::parse_gallery_entries;
///
/// let html = r#"<a class="item" photo-id="7" href-large="https://x/7.jpg"><img title="A - B"></a>"#;
/// let entries = parse_gallery_entries(html);
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].id, "7");
/// assert_eq!(entries[0].title, "A - B");
/// ```
pub fn parse_gallery_entries(html: &str) -> Vec<GalleryEntry> {
    let document = Html::parse_document(html);
    let Ok(item_selector) = Selector::parse("a.item") else {
        return Vec::new();
    };

    document
        .select(&item_selector)
        .filter_map(|element| {
            let entry = parse_entry(element);
            if entry.is_none() {
                tracing::debug!("Skipping gallery item without a photo-id");
            }
            entry
        })
        .collect()
}

fn parse_entry(element: ElementRef<'_>) -> Option<GalleryEntry> {
    let value = element.value();
    let id = value.attr("photo-id")?.trim().to_string();
    if id.is_empty() {
        return None;
    }

    let title = Selector::parse("img")
        .ok()
        .and_then(|img| element.select(&img).next())
        .and_then(|img| img.value().attr("title"))
        .unwrap_or_default()
        .to_string();

    Some(GalleryEntry {
        id,
        large_url: value.attr("href-large").map(str::to_string),
        href: value.attr("href").map(str::to_string),
        title,
        is_series: value.classes().any(|class| class == "series"),
    })
}

/// Finds the numeric user id in the profile page's RSS feed link
///
/// The link looks like `<base>/rss/user_<id>.xml`. Returns `None` when no
/// anchor on the page matches.
pub fn extract_user_id(html: &str, base_url: &str) -> Option<String> {
    let pattern = format!(
        r"{}/rss/user_(\d+)\.xml",
        regex::escape(base_url.trim_end_matches('/'))
    );
    let feed_link = Regex::new(&pattern).ok()?;

    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").ok()?;

    document
        .select(&anchor_selector)
        .filter_map(|a| a.value().attr("href"))
        .find_map(|href| feed_link.captures(href))
        .map(|captures| captures[1].to_string())
}

/// Extracts the image URLs of a series page, in display order
///
/// The photos live in an inline script inside `div.containerMain` as
/// `photoData = {...};` followed by a newline. The object's `series`
/// array holds one `{ "src": ... }` per photo.
pub fn parse_series_photos(html: &str) -> Result<Vec<String>, String> {
    let document = Html::parse_document(html);
    let script_selector = Selector::parse("div.containerMain script")
        .map_err(|e| format!("Invalid selector: {}", e))?;

    let script = document
        .select(&script_selector)
        .map(|script| script.text().collect::<String>())
        .find(|text| text.contains(PHOTO_DATA_MARKER))
        .ok_or_else(|| "No photoData script found".to_string())?;

    let json = embedded_photo_data(&script)
        .ok_or_else(|| "Unterminated photoData assignment".to_string())?;

    let data: PhotoData =
        serde_json::from_str(json).map_err(|e| format!("Invalid photoData JSON: {}", e))?;

    Ok(data.series.into_iter().map(|photo| photo.src).collect())
}

/// Slices the JSON object out of a `photoData = {...};\n` assignment
fn embedded_photo_data(script: &str) -> Option<&str> {
    let begin = script.find(PHOTO_DATA_MARKER)? + PHOTO_DATA_MARKER.len();
    let rest = &script[begin..];
    let end = rest.find(";\n")?;
    Some(rest[..end].trim())
}

/// Decodes the next-page endpoint's JSON body
pub fn parse_next_page(body: &str) -> Result<NextPage, serde_json::Error> {
    serde_json::from_str(body)
}
