/// Characters that cannot appear in file names on common filesystems
fn is_banned(c: char) -> bool {
    matches!(c, '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|')
}

/// Sanitizes a raw title into a file-name-safe string
///
/// Banned path characters become spaces, whitespace runs collapse to a
/// single space and the ends are trimmed.
///
/// Returns `None` when the result is unusable as a name:
/// - it is empty
/// - it consists only of ASCII punctuation
/// - it is one character repeated more than once (placeholder titles
///   such as `"xxxx"` or `"...."`)
///
/// # Examples
///
/// ```
/// use photo_ripple::naming::sanitize;
///
/// assert_eq!(sanitize("  a/b   c "), Some("a b c".to_string()));
/// assert_eq!(sanitize("***"), None);
/// ```
pub fn sanitize(title: &str) -> Option<String> {
    let replaced: String = title
        .chars()
        .map(|c| if is_banned(c) { ' ' } else { c })
        .collect();
    let clean = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

    if clean.chars().all(|c| c.is_ascii_punctuation()) {
        return None;
    }

    let mut chars = clean.chars();
    if let Some(first) = chars.next() {
        if clean.chars().count() > 1 && chars.all(|c| c == first) {
            return None;
        }
    }

    Some(clean)
}
