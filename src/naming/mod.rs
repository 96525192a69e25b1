//! Local file naming for downloaded photos
//!
//! This module turns server-provided photo ids and titles into stable
//! display names:
//! - `sanitize` cleans a raw title or reports it as unusable
//! - `display_name` combines a photo id with its title
//! - `series_member_name` numbers the photos of a series

mod sanitize;

pub use sanitize::sanitize;

/// Separator between the author and the photo title in gallery titles
pub const TITLE_SEPARATOR: &str = " - ";

/// Builds the display name for a gallery entry
///
/// Titles look like `"Author - Title"`. The segment after the first
/// separator is sanitized and appended to the id. Titles without a
/// separator, or whose title segment is unusable, fall back to the bare id.
///
/// # Examples
///
/// ```
/// use photo_ripple::naming::display_name;
///
/// assert_eq!(display_name("123", "Jane Doe - Sunset: Part 1"), "123 Sunset Part 1");
/// assert_eq!(display_name("123", "Jane Doe - ..."), "123");
/// assert_eq!(display_name("123", "Untitled"), "123");
/// ```
pub fn display_name(id: &str, title: &str) -> String {
    match title.split(TITLE_SEPARATOR).nth(1).and_then(sanitize) {
        Some(clean) => format!("{} {}", id, clean),
        None => id.to_string(),
    }
}

/// Names the photo at 1-based `index` within a series
pub fn series_member_name(base: &str, index: usize) -> String {
    format!("{} ({:02})", base, index)
}
