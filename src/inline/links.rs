//! Link, image and free-link scanning.
//!
//! Handles:
//! - Links: `[[target]]` and `[[target|label]]`
//! - Images: `{{target}}` and `{{target|alt}}`
//! - Free-standing links: `http://`, `https://` and `ftp://` URLs
//!
//! Links and images must close on the line they open on.

use memchr::memchr;

use super::escape_end;

/// Free-standing link prefixes.
const FREE_LINK_SCHEMES: [&[u8]; 3] = [b"http://", b"https://", b"ftp://"];

/// Punctuation that is not part of a free link when it ends the URL.
const TRAILING_PUNCTUATION: &[u8] = b",.?!:;\"'";

/// End of the line containing `from`, bounded by `end`.
#[inline]
pub(crate) fn line_end(bytes: &[u8], from: usize, end: usize) -> usize {
    match memchr(b'\n', &bytes[from..end]) {
        Some(p) => from + p,
        None => end,
    }
}

/// Position of the `]]` closing a link whose target starts at `from`.
///
/// Escaped characters are stepped over so `~]]` does not close the link.
pub fn link_close(text: &str, from: usize, end: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let limit = line_end(bytes, from, end);
    let mut pos = from;
    while pos + 2 <= limit {
        if let Some(next) = escape_end(text, pos, limit) {
            pos = next;
            continue;
        }
        if &bytes[pos..pos + 2] == b"]]" {
            return Some(pos);
        }
        pos += 1;
    }
    None
}

/// Position of the `}}` closing an image whose source starts at `from`.
pub fn image_close(text: &str, from: usize, end: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let limit = line_end(bytes, from, end);
    memchr::memmem::find(&bytes[from..limit], b"}}").map(|p| from + p)
}

/// Split `target|rest` at the first unescaped pipe.
///
/// The target is trimmed and its escapes resolved, matching how
/// [`link_close`] steps over them: `a~|b|c` splits into `a|b` and `c`.
pub fn split_target(inner: &str) -> (String, Option<&str>) {
    let bytes = inner.as_bytes();
    let mut pos = 0;
    while pos < bytes.len() {
        if let Some(next) = escape_end(inner, pos, bytes.len()) {
            pos = next;
            continue;
        }
        if bytes[pos] == b'|' {
            return (unescape(inner[..pos].trim()), Some(&inner[pos + 1..]));
        }
        pos += 1;
    }
    (unescape(inner.trim()), None)
}

/// Drop the `~` of every escape in `text`.
fn unescape(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;
    while let Some(p) = memchr(b'~', &bytes[pos..]) {
        let tilde = pos + p;
        match escape_end(text, tilde, text.len()) {
            Some(next) => {
                out.push_str(&text[copied..tilde]);
                copied = tilde + 1;
                pos = next;
            }
            None => pos = tilde + 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Length of the free-link scheme prefix at the start of `bytes`.
#[inline]
pub fn free_link_scheme_len(bytes: &[u8]) -> Option<usize> {
    match bytes.first() {
        Some(b'h') | Some(b'f') => FREE_LINK_SCHEMES
            .iter()
            .find(|scheme| bytes.starts_with(scheme))
            .map(|scheme| scheme.len()),
        _ => None,
    }
}

/// End of a free link starting at `start`.
///
/// The URL runs to the first space, tab or newline (or `end`); a single
/// trailing punctuation character is left out. Returns `None` when
/// nothing but the scheme would remain.
pub fn free_link_end(text: &str, start: usize, end: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let scheme = free_link_scheme_len(&bytes[start..end])?;

    let mut url_end = start + scheme;
    while url_end < end && !matches!(bytes[url_end], b' ' | b'\t' | b'\n') {
        url_end += 1;
    }

    if url_end > start + scheme && TRAILING_PUNCTUATION.contains(&bytes[url_end - 1]) {
        url_end -= 1;
    }

    (url_end > start + scheme).then_some(url_end)
}

/// Check whether a URI is absolute in the `<scheme>://` sense.
///
/// Narrower than RFC 3986: the slashes are required, so interwiki links
/// such as `Wiki:Page` count as relative and reach the link resolver.
pub fn is_absolute(uri: &str) -> bool {
    let bytes = uri.as_bytes();
    if bytes.len() < 4 || !bytes[0].is_ascii_alphabetic() {
        return false;
    }
    let scheme_end = bytes[1..]
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')))
        .map_or(bytes.len(), |p| p + 1);
    bytes[scheme_end..].starts_with(b"://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_close() {
        let text = "[[target|label]] after";
        assert_eq!(link_close(text, 2, text.len()), Some(14));
    }

    #[test]
    fn test_link_close_escaped() {
        let text = "[[a~]]b]]";
        assert_eq!(link_close(text, 2, text.len()), Some(7));
    }

    #[test]
    fn test_link_close_stops_at_newline() {
        let text = "[[a\nb]]";
        assert_eq!(link_close(text, 2, text.len()), None);
    }

    #[test]
    fn test_image_close() {
        let text = "{{pic.png|A picture}}";
        assert_eq!(image_close(text, 2, text.len()), Some(19));
        assert_eq!(image_close("{{pic.png", 2, 9), None);
    }

    #[test]
    fn test_split_target() {
        assert_eq!(split_target(" a.png | alt "), ("a.png".to_owned(), Some(" alt ")));
        assert_eq!(split_target("Page"), ("Page".to_owned(), None));
        assert_eq!(split_target("a|b|c"), ("a".to_owned(), Some("b|c")));
    }

    #[test]
    fn test_split_target_escaped_pipe() {
        assert_eq!(split_target("a~|b|c"), ("a|b".to_owned(), Some("c")));
        assert_eq!(split_target("a~]]b"), ("a]]b".to_owned(), None));
        assert_eq!(split_target("~~x|y"), ("~x".to_owned(), Some("y")));
        assert_eq!(split_target("a ~ b~"), ("a ~ b~".to_owned(), None));
    }

    #[test]
    fn test_free_link_schemes() {
        assert_eq!(free_link_scheme_len(b"http://x"), Some(7));
        assert_eq!(free_link_scheme_len(b"https://x"), Some(8));
        assert_eq!(free_link_scheme_len(b"ftp://x"), Some(6));
        assert_eq!(free_link_scheme_len(b"mailto:x"), None);
        assert_eq!(free_link_scheme_len(b"http:/x"), None);
    }

    #[test]
    fn test_free_link_end_trims_one_punctuation() {
        let text = "http://example.com/page.";
        assert_eq!(free_link_end(text, 0, text.len()), Some(text.len() - 1));
        let text = "http://example.com/?!";
        assert_eq!(free_link_end(text, 0, text.len()), Some(text.len() - 1));
    }

    #[test]
    fn test_free_link_end_stops_at_whitespace() {
        let text = "http://a.com b";
        assert_eq!(free_link_end(text, 0, text.len()), Some(12));
    }

    #[test]
    fn test_free_link_needs_more_than_scheme() {
        assert_eq!(free_link_end("http:// x", 0, 9), None);
        assert_eq!(free_link_end("http://.", 0, 8), None);
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("http://example.com"));
        assert!(is_absolute("svn+ssh://host/repo"));
        assert!(!is_absolute("WikiCreole:Page"));
        assert!(!is_absolute("Page"));
        assert!(!is_absolute("1http://x"));
        assert!(!is_absolute("a:/"));
    }
}
