//! File-name component sanitizing
//!
//! Project codes and versions end up in export file names, so anything
//! outside `[A-Za-z0-9_-]` is replaced before it reaches the filesystem.

/// Replace every character outside `[A-Za-z0-9_-]` with `_`
///
/// # Examples
///
/// ```
/// use lexicon_domain::sanitize;
///
/// assert_eq!(sanitize("en/../g"), "en____g");
/// assert_eq!(sanitize("safe-name_1"), "safe-name_1");
/// ```
pub fn sanitize(component: &str) -> String {
    component
        .chars()
        .map(|c| if is_safe(c) { c } else { '_' })
        .collect()
}

fn is_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}
