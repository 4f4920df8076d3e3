//! Text serializations of a word list
//!
//! Both formats are pure: they never touch storage or the expansion tool.

/// Render a counted word list: the count, then one word per line
///
/// No trailing newline is written.
///
/// # Examples
///
/// ```
/// use lexicon_export::format::to_counted_list;
///
/// assert_eq!(to_counted_list(&["a", "b"]), "2\na\nb");
/// ```
pub fn to_counted_list<S: AsRef<str>>(words: &[S]) -> String {
    let mut out = words.len().to_string();
    for word in words {
        out.push('\n');
        out.push_str(word.as_ref());
    }
    out
}

/// Render a `SpellingStatus` XML document marking every word as correct
///
/// # Examples
///
/// ```
/// use lexicon_export::format::to_status_xml;
///
/// let xml = to_status_xml(&["a"]);
/// assert!(xml.contains(r#"<Status Word="a" State="R" />"#));
/// ```
pub fn to_status_xml<S: AsRef<str>>(words: &[S]) -> String {
    let mut lines = Vec::with_capacity(words.len() + 3);
    lines.push(r#"<?xml version="1.0" encoding="utf-8"?>"#.to_string());
    lines.push("<SpellingStatus>".to_string());
    for word in words {
        lines.push(format!(
            r#"  <Status Word="{}" State="R" />"#,
            escape_xml(word.as_ref())
        ));
    }
    lines.push("</SpellingStatus>".to_string());
    lines.join("\n")
}

/// Escape text for use in an XML attribute value or element body
pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counted_list_exact() {
        assert_eq!(to_counted_list(&["a", "b"]), "2\na\nb");
    }

    #[test]
    fn test_counted_list_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(to_counted_list(&empty), "0");
    }

    #[test]
    fn test_counted_list_keeps_flags() {
        let words = vec!["walk/AC".to_string(), "ignoreme/!".to_string()];
        assert_eq!(to_counted_list(&words), "2\nwalk/AC\nignoreme/!");
    }

    #[test]
    fn test_status_xml_exact() {
        assert_eq!(
            to_status_xml(&["a"]),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<SpellingStatus>\n  <Status Word=\"a\" State=\"R\" />\n</SpellingStatus>"
        );
    }

    #[test]
    fn test_status_xml_keeps_flag_suffix() {
        let xml = to_status_xml(&["word2/FLAGS"]);
        assert!(xml.contains(r#"<Status Word="word2/FLAGS" State="R" />"#));
    }

    #[test]
    fn test_status_xml_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(
            to_status_xml(&empty),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<SpellingStatus>\n</SpellingStatus>"
        );
    }

    #[test]
    fn test_attribute_escaping() {
        assert_eq!(escape_xml(r#"a&b<c>"d"#), "a&amp;b&lt;c&gt;&quot;d");
        assert_eq!(escape_xml("tok'pisin"), "tok'pisin");
    }
}
