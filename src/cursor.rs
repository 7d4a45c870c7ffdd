//! Byte cursor for scanning a single text run.
//!
//! All Creole markup is ASCII, so scanning happens on bytes; slicing back
//! into `&str` only ever happens at ASCII positions or at positions
//! reached by stepping over whole characters.

/// A cursor over the bytes of a `&str`.
///
/// # Example
/// ```
/// use creole_html::cursor::Cursor;
///
/// let mut cursor = Cursor::new("== Title");
/// assert_eq!(cursor.skip_byte(b'='), 2);
/// assert_eq!(cursor.rest(), " Title");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `text`.
    #[inline]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Create a cursor starting at a byte offset.
    #[inline]
    pub fn new_at(text: &'a str, offset: usize) -> Self {
        debug_assert!(offset <= text.len());
        Self { text, pos: offset }
    }

    /// Current byte offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Peek the current byte without advancing.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Advance by `n` bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.text.len());
        self.pos = (self.pos + n).min(self.text.len());
    }

    /// Check if the remaining input starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.text.as_bytes()[self.pos..].starts_with(prefix.as_bytes())
    }

    /// Skip while the predicate holds, returning the number of bytes skipped.
    #[inline]
    pub fn skip_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !predicate(b) {
                break;
            }
            self.pos += 1;
        }
        self.pos - start
    }

    /// Skip a run of one specific byte.
    #[inline]
    pub fn skip_byte(&mut self, b: u8) -> usize {
        self.skip_while(|c| c == b)
    }

    /// Text from the cursor to the end.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Text between `start` and the cursor.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.text[start..self.pos]
    }
}
