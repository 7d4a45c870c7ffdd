//! Two-character span delimiters and closer lookahead.
//!
//! An opener only becomes a span when a closer of the same kind exists
//! further along the same text run. The search steps over escapes,
//! nowiki, links, images and free links exactly the way the main
//! scanner does, so a closer is never found inside something the scanner
//! would treat as atomic.

use super::links::{free_link_end, free_link_scheme_len};
use super::misses::MissCache;
use super::node::Inline;
use super::skip_atomic;

/// Kinds of delimited inline spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Bold,
    Italic,
    Underline,
    Superscript,
    Subscript,
}

impl SpanKind {
    pub const COUNT: usize = 5;

    /// The span kind whose delimiter starts at `pos`, if any.
    #[inline]
    pub fn at(bytes: &[u8], pos: usize) -> Option<Self> {
        let pair = bytes.get(pos..pos + 2)?;
        match pair {
            b"**" => Some(Self::Bold),
            b"//" => Some(Self::Italic),
            b"__" => Some(Self::Underline),
            b"^^" => Some(Self::Superscript),
            b",," => Some(Self::Subscript),
            _ => None,
        }
    }

    /// The delimiter text.
    #[inline]
    pub fn delimiter(self) -> &'static [u8; 2] {
        match self {
            Self::Bold => b"**",
            Self::Italic => b"//",
            Self::Underline => b"__",
            Self::Superscript => b"^^",
            Self::Subscript => b",,",
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Wrap parsed children in the matching inline variant.
    pub fn wrap(self, children: Vec<Inline>) -> Inline {
        match self {
            Self::Bold => Inline::Bold(children),
            Self::Italic => Inline::Italic(children),
            Self::Underline => Inline::Underline(children),
            Self::Superscript => Inline::Superscript(children),
            Self::Subscript => Inline::Subscript(children),
        }
    }
}

/// Find the closing delimiter for `kind` in `text[from..end]`.
///
/// Returns the position of the closer's first byte.
pub(crate) fn find_closer(
    text: &str,
    from: usize,
    end: usize,
    kind: SpanKind,
    cache: &mut MissCache,
) -> Option<usize> {
    if cache.covers_span(kind, from, end) {
        return None;
    }

    let bytes = text.as_bytes();
    let delimiter = kind.delimiter();
    let mut pos = from;
    while pos + 2 <= end {
        if let Some(next) = skip_atomic(text, pos, end, cache) {
            pos = next;
            continue;
        }
        if &bytes[pos..pos + 2] == delimiter {
            return Some(pos);
        }
        if let Some(scheme) = free_link_scheme_len(&bytes[pos..end]) {
            pos = free_link_end(text, pos, end).unwrap_or(pos + scheme);
            continue;
        }
        pos += 1;
    }

    cache.record_span(kind, from, end);
    None
}
