//! Inline parser for Creole.
//!
//! Scans one fully materialized text run left to right. Atomic constructs
//! (escapes, nowiki, links, images, free links, line breaks) are consumed
//! as soon as they are recognized. A span delimiter only opens a span
//! after a lookahead has located its closer in the same run, so every span
//! in the output tree is complete and unmatched delimiters stay literal.

mod emphasis;
pub mod links;
mod misses;
mod node;
mod nowiki;

pub use emphasis::SpanKind;
pub use node::{Inline, plain_text};
pub(crate) use misses::MissCache;

use smallvec::SmallVec;

use crate::cursor::Cursor;

use emphasis::find_closer;
use links::{free_link_end, free_link_scheme_len, image_close, line_end, link_close, split_target};
use misses::Atomic;
use node::push_text;
use nowiki::nowiki_close;

/// Parse a text run into inline content.
///
/// # Example
/// ```
/// use creole_html::inline::{parse, Inline};
///
/// let inlines = parse("**bold**");
/// assert_eq!(inlines, vec![Inline::Bold(vec![Inline::Text("bold".into())])]);
/// ```
pub fn parse(text: &str) -> Vec<Inline> {
    InlineParser::new(text).parse()
}

/// Byte after an escape sequence starting at `pos`.
///
/// `~` escapes the following character unless it is whitespace or there
/// is none; a lone `~` is plain text.
#[inline]
pub(crate) fn escape_end(text: &str, pos: usize, end: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes[pos] != b'~' || pos + 1 >= end {
        return None;
    }
    match bytes[pos + 1] {
        b' ' | b'\t' | b'\n' | b'\r' => None,
        _ => {
            let width = text[pos + 1..].chars().next().map_or(1, char::len_utf8);
            Some(pos + 1 + width)
        }
    }
}

/// Closer of a link, image or nowiki whose content starts at `from`.
///
/// Misses are remembered in `misses`, so a line full of unclosed openers
/// is scanned once.
fn atomic_close(
    text: &str,
    atomic: Atomic,
    from: usize,
    end: usize,
    misses: &mut MissCache,
) -> Option<usize> {
    if misses.covers_atomic(atomic, from, end) {
        return None;
    }
    let close = match atomic {
        Atomic::Link => link_close(text, from, end),
        Atomic::Image => image_close(text, from, end),
        Atomic::Nowiki => nowiki_close(text, from, end),
    };
    if close.is_none() {
        let limit = line_end(text.as_bytes(), from, end);
        misses.record_atomic(atomic, from, end, limit);
    }
    close
}

/// Byte after an atomic construct (escape, nowiki, link or image) that
/// starts at `pos`. Unclosed constructs are not atomic.
#[inline]
pub(crate) fn skip_atomic(
    text: &str,
    pos: usize,
    end: usize,
    misses: &mut MissCache,
) -> Option<usize> {
    let bytes = text.as_bytes();
    match bytes[pos] {
        b'~' => escape_end(text, pos, end),
        b'{' if bytes[pos..end].starts_with(b"{{{") => {
            atomic_close(text, Atomic::Nowiki, pos + 3, end, misses).map(|close| close + 3)
        }
        b'{' if bytes[pos..end].starts_with(b"{{") => {
            atomic_close(text, Atomic::Image, pos + 2, end, misses).map(|close| close + 2)
        }
        b'[' if bytes[pos..end].starts_with(b"[[") => {
            atomic_close(text, Atomic::Link, pos + 2, end, misses).map(|close| close + 2)
        }
        _ => None,
    }
}

/// End of the table cell starting at `from`: the next `|` that is not
/// escaped or inside a link, image or nowiki, or the end of the row.
///
/// Pass the same `misses` for every cell of a row.
pub(crate) fn cell_end(row: &str, from: usize, misses: &mut MissCache) -> usize {
    let bytes = row.as_bytes();
    let end = bytes.len();
    let mut pos = from;
    while pos < end {
        if let Some(next) = skip_atomic(row, pos, end, misses) {
            pos = next;
            continue;
        }
        if bytes[pos] == b'|' {
            return pos;
        }
        pos += 1;
    }
    end
}

/// Inline parser state for one text run.
pub struct InlineParser<'a> {
    text: &'a str,
    /// Span kinds currently open, innermost last.
    open: SmallVec<[SpanKind; 8]>,
    /// Whether a link label is being parsed (no nested links).
    in_link: bool,
    /// Whether the last emitted run was a line break.
    after_break: bool,
    misses: MissCache,
}

impl<'a> InlineParser<'a> {
    /// Create a parser over a text run.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            open: SmallVec::new(),
            in_link: false,
            after_break: false,
            misses: MissCache::default(),
        }
    }

    /// Parse the whole run.
    pub fn parse(mut self) -> Vec<Inline> {
        self.parse_range(0, self.text.len())
    }

    fn text_run(&mut self, out: &mut Vec<Inline>, start: usize, end: usize) {
        if start < end {
            push_text(out, &self.text[start..end]);
            self.after_break = false;
        }
    }

    /// Parse `text[start..end]`, where `end` is either the end of the run
    /// or the position of the closer of the innermost open span.
    fn parse_range(&mut self, start: usize, end: usize) -> Vec<Inline> {
        let text = self.text;
        let bytes = text.as_bytes();
        let mut out = Vec::new();
        let mut cur = Cursor::new_at(&text[..end], start);
        let mut text_start = start;

        while let Some(b) = cur.peek() {
            let pos = cur.offset();
            match b {
                b'~' => {
                    if let Some(escaped_end) = escape_end(text, pos, end) {
                        self.text_run(&mut out, text_start, pos);
                        self.text_run(&mut out, pos + 1, escaped_end);
                        cur.advance(escaped_end - pos);
                        text_start = escaped_end;
                    } else {
                        cur.advance(1);
                    }
                }
                b'\n' => {
                    self.text_run(&mut out, text_start, pos);
                    if !self.after_break {
                        push_text(&mut out, " ");
                    }
                    cur.advance(1);
                    text_start = pos + 1;
                }
                b'\\' if cur.starts_with("\\\\") => {
                    self.text_run(&mut out, text_start, pos);
                    out.push(Inline::LineBreak);
                    self.after_break = true;
                    cur.advance(2);
                    text_start = pos + 2;
                }
                b'{' if cur.starts_with("{{{") => match self.atomic_close(Atomic::Nowiki, pos + 3, end) {
                    Some(close) => {
                        self.text_run(&mut out, text_start, pos);
                        out.push(Inline::Code(text[pos + 3..close].to_owned()));
                        self.after_break = false;
                        cur.advance(close + 3 - pos);
                        text_start = close + 3;
                    }
                    None => cur.advance(3),
                },
                b'{' if cur.starts_with("{{") => match self.atomic_close(Atomic::Image, pos + 2, end) {
                    Some(close) => {
                        self.text_run(&mut out, text_start, pos);
                        let (target, alt) = split_target(&text[pos + 2..close]);
                        out.push(Inline::Image {
                            target,
                            alt: alt.map(|a| a.trim().to_owned()),
                        });
                        self.after_break = false;
                        cur.advance(close + 2 - pos);
                        text_start = close + 2;
                    }
                    None => cur.advance(2),
                },
                b'[' if cur.starts_with("[[") => {
                    let close = if self.in_link {
                        None
                    } else {
                        self.atomic_close(Atomic::Link, pos + 2, end)
                    };
                    match close {
                        Some(close) => {
                            self.text_run(&mut out, text_start, pos);
                            let link = self.parse_link(pos + 2, close);
                            out.push(link);
                            self.after_break = false;
                            cur.advance(close + 2 - pos);
                            text_start = close + 2;
                        }
                        None => cur.advance(2),
                    }
                }
                b'h' | b'f' => match free_link_end(text, pos, end) {
                    // Link labels keep URLs as plain text.
                    Some(url_end) if self.in_link => cur.advance(url_end - pos),
                    Some(url_end) => {
                        self.text_run(&mut out, text_start, pos);
                        out.push(Inline::Link {
                            target: text[pos..url_end].to_owned(),
                            label: None,
                        });
                        self.after_break = false;
                        cur.advance(url_end - pos);
                        text_start = url_end;
                    }
                    None => cur.advance(free_link_scheme_len(&bytes[pos..end]).unwrap_or(1)),
                },
                _ => match SpanKind::at(&bytes[..end], pos) {
                    Some(kind) => match self.locate_closer(kind, pos + 2, end) {
                        Some(close) => {
                            self.text_run(&mut out, text_start, pos);
                            self.open.push(kind);
                            let children = self.parse_range(pos + 2, close);
                            self.open.pop();
                            out.push(kind.wrap(children));
                            cur.advance(close + 2 - pos);
                            text_start = close + 2;
                        }
                        None => cur.advance(2),
                    },
                    None => cur.advance(1),
                },
            }
        }

        self.text_run(&mut out, text_start, end);
        out
    }

    fn atomic_close(&mut self, atomic: Atomic, from: usize, end: usize) -> Option<usize> {
        atomic_close(self.text, atomic, from, end, &mut self.misses)
    }

    /// Closer for a span opener, or `None` when the opener is literal.
    fn locate_closer(&mut self, kind: SpanKind, from: usize, end: usize) -> Option<usize> {
        if self.open.contains(&kind) {
            return None;
        }
        find_closer(self.text, from, end, kind, &mut self.misses)
    }

    /// Build a link from the text between `[[` and `]]`.
    fn parse_link(&mut self, start: usize, close: usize) -> Inline {
        let inner = &self.text[start..close];
        let (target, label) = split_target(inner);
        match label {
            Some(label) => {
                let label_start = close - label.len();
                // Searches that skipped this link as a whole say nothing
                // about the label, so it gets its own cache.
                let outer = std::mem::take(&mut self.misses);
                self.in_link = true;
                let children = self.parse_range(label_start, close);
                self.in_link = false;
                self.misses = outer;
                Inline::Link {
                    target,
                    label: Some(children),
                }
            }
            None => Inline::Link {
                target,
                label: None,
            },
        }
    }
}
