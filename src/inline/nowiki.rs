//! Inline nowiki (`{{{...}}}`).
//!
//! The content is literal. The span closes at the first `}}}` that is not
//! followed by another `}`, so `{{{a}}}}` holds `a}`.

use memchr::memchr;

use super::links::line_end;

/// Position of the `}}}` closing nowiki content that starts at `from`.
///
/// Nowiki never spans lines.
pub fn nowiki_close(text: &str, from: usize, end: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let limit = line_end(bytes, from, end);

    let mut pos = from;
    while pos + 3 <= limit {
        match memchr(b'}', &bytes[pos..limit]) {
            Some(p) => pos += p,
            None => return None,
        }
        if pos + 3 > limit {
            return None;
        }
        if &bytes[pos..pos + 3] == b"}}}" && (pos + 3 == limit || bytes[pos + 3] != b'}') {
            return Some(pos);
        }
        pos += 1;
    }
    None
}
