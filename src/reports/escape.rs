//! Escaping for HTML output.
//!
//! Deck names and image paths are taken from the file system and may contain
//! markup characters. Everything user-controlled goes through these helpers
//! before it is embedded in a report.

use std::path::Path;

/// Escape a string for safe inclusion in HTML content.
///
/// # Examples
///
/// ```
/// use deck_diff::reports::escape::escape_html;
///
/// assert_eq!(escape_html("<b>Q3 & Q4</b>"), "&lt;b&gt;Q3 &amp; Q4&lt;/b&gt;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for an HTML attribute value.
///
/// Stricter than [`escape_html`]: whitespace control characters are encoded
/// too.
#[must_use]
pub fn escape_html_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            '\t' => result.push_str("&#9;"),
            _ => result.push_str(&escape_html(c.encode_utf8(&mut [0; 4]))),
        }
    }
    result
}

/// `file://` URL for a local image, percent-encoding characters that would
/// end or confuse the path.
#[must_use]
pub fn file_url(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    let mut url = String::from("file://");
    if !raw.starts_with('/') {
        url.push('/');
    }
    for c in raw.chars() {
        match c {
            '%' => url.push_str("%25"),
            ' ' => url.push_str("%20"),
            '#' => url.push_str("%23"),
            '?' => url.push_str("%3F"),
            '"' => url.push_str("%22"),
            _ => url.push(c),
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_basic() {
        assert_eq!(escape_html("hello"), "hello");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_escape_html_script() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_escape_attr_whitespace() {
        assert_eq!(escape_html_attr("a\nb\"c"), "a&#10;b&quot;c");
    }

    #[test]
    fn test_file_url() {
        assert_eq!(
            file_url(Path::new("/tmp/my deck/slide_001.png")),
            "file:///tmp/my%20deck/slide_001.png"
        );
        assert_eq!(file_url(Path::new("/a/b#1.png")), "file:///a/b%231.png");
    }
}
