//! Line sources.
//!
//! The block parser consumes text one line at a time. Anything that can
//! produce lines implements [`LineSource`]: whole documents (`&str`,
//! `String`) are split on CR, LF or CRLF, and sequences of lines are fed
//! through item by item. Items that still carry terminators (as lines read
//! from a file usually do) are split the same way, so callers never have to
//! pre-process their input.

use memchr::memchr2;

/// A source of Creole text lines.
pub trait LineSource {
    /// Feed every line, without its terminator, to `sink` in order.
    fn for_each_line<F: FnMut(&str)>(self, sink: F);
}

/// Iterator over the lines of a string.
///
/// Lines are delimited by CR, LF, or CRLF. The terminators are not part of
/// the yielded lines; a trailing terminator does not produce an empty line.
///
/// # Example
/// ```
/// use creole_html::source::LineReader;
///
/// let lines: Vec<_> = LineReader::new("one\r\ntwo\rthree\n").collect();
/// assert_eq!(lines, ["one", "two", "three"]);
/// ```
#[derive(Debug, Clone)]
pub struct LineReader<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> LineReader<'a> {
    /// Create a reader over `text`.
    #[inline]
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }
}

impl<'a> Iterator for LineReader<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        if self.offset >= bytes.len() {
            return None;
        }

        let start = self.offset;
        let end = match memchr2(b'\r', b'\n', &bytes[start..]) {
            Some(pos) => start + pos,
            None => bytes.len(),
        };

        self.offset = end;
        if self.offset < bytes.len() {
            let terminator = bytes[self.offset];
            self.offset += 1;
            if terminator == b'\r' && bytes.get(self.offset) == Some(&b'\n') {
                self.offset += 1;
            }
        }

        Some(&self.text[start..end])
    }
}

/// Feed one item of a line sequence, splitting any embedded terminators.
#[inline]
fn feed_item<F: FnMut(&str)>(item: &str, sink: &mut F) {
    if item.is_empty() {
        sink("");
        return;
    }
    for line in LineReader::new(item) {
        sink(line);
    }
}

/// Wrapper turning any iterator of string-likes into a [`LineSource`].
///
/// Built with [`lines`].
#[derive(Debug, Clone)]
pub struct Lines<I>(I);

/// Use an arbitrary iterator of lines as a [`LineSource`].
///
/// # Example
/// ```
/// use creole_html::{source, Parser};
///
/// let input = vec!["== Title".to_string(), "Body".to_string()];
/// let result = Parser::new().parse(source::lines(input.iter()));
/// assert_eq!(result.html(), "<h2>Title</h2>\n<p>Body</p>\n");
/// ```
pub fn lines<I>(iter: I) -> Lines<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Lines(iter.into_iter())
}

impl<I> LineSource for Lines<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    fn for_each_line<F: FnMut(&str)>(self, mut sink: F) {
        for item in self.0 {
            feed_item(item.as_ref(), &mut sink);
        }
    }
}

impl LineSource for &str {
    fn for_each_line<F: FnMut(&str)>(self, mut sink: F) {
        for line in LineReader::new(self) {
            sink(line);
        }
    }
}

impl LineSource for String {
    fn for_each_line<F: FnMut(&str)>(self, sink: F) {
        self.as_str().for_each_line(sink);
    }
}

impl LineSource for &String {
    fn for_each_line<F: FnMut(&str)>(self, sink: F) {
        self.as_str().for_each_line(sink);
    }
}

impl LineSource for std::str::Lines<'_> {
    fn for_each_line<F: FnMut(&str)>(self, sink: F) {
        lines(self).for_each_line(sink);
    }
}

impl<S: AsRef<str>> LineSource for &[S] {
    fn for_each_line<F: FnMut(&str)>(self, sink: F) {
        lines(self).for_each_line(sink);
    }
}

impl<S: AsRef<str>> LineSource for Vec<S> {
    fn for_each_line<F: FnMut(&str)>(self, sink: F) {
        lines(self).for_each_line(sink);
    }
}

impl<S: AsRef<str>, const N: usize> LineSource for [S; N] {
    fn for_each_line<F: FnMut(&str)>(self, sink: F) {
        lines(self).for_each_line(sink);
    }
}
