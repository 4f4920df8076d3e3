//! Counted word-list header handling

/// Ensure the word list starts with an integer count line
///
/// If the first line is not a decimal integer, `default_count` is prepended
/// as the header. The expansion tool requires the header but does not check
/// that it matches the number of words.
pub fn ensure_count_header(content: &str, default_count: usize) -> String {
    let first = content.lines().next().unwrap_or("").trim();
    if !first.is_empty() && first.chars().all(|c| c.is_ascii_digit()) {
        content.to_string()
    } else {
        format!("{}\n{}", default_count, content)
    }
}
