//! HTML output writer with a stack of open tags.
//!
//! Every start tag goes through [`HtmlWriter::open`] and is recorded on the
//! stack; end tags are only ever written by popping it, so the output is
//! balanced no matter how rendering is driven. Line layout follows three
//! tag classes:
//!
//! - content tags (`p`, `h1`-`h6`, `li`, `dt`, `dd`, `th`, `td`) start on a
//!   fresh line and hug their text: leading whitespace of the first text
//!   and trailing whitespace before the end tag are dropped;
//! - container tags (`ul`, `ol`, `dl`, `table`, `tr`, `pre`, `hr`) sit on
//!   lines of their own;
//! - inline tags never add line breaks.

use smallvec::SmallVec;

use crate::escape;

/// HTML elements produced by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Paragraph,
    /// `h1` to `h6`.
    Heading(u8),
    UnorderedList,
    OrderedList,
    ListItem,
    DefinitionList,
    Term,
    Description,
    Table,
    Row,
    HeaderCell,
    DataCell,
    Preformatted,
    Rule,
    Break,
    Strong,
    Emphasis,
    Underline,
    Superscript,
    Subscript,
    Code,
    Anchor,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Container,
    Content,
    Inline,
}

impl Tag {
    /// Element name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Paragraph => "p",
            Self::Heading(level) => match level {
                0 | 1 => "h1",
                2 => "h2",
                3 => "h3",
                4 => "h4",
                5 => "h5",
                _ => "h6",
            },
            Self::UnorderedList => "ul",
            Self::OrderedList => "ol",
            Self::ListItem => "li",
            Self::DefinitionList => "dl",
            Self::Term => "dt",
            Self::Description => "dd",
            Self::Table => "table",
            Self::Row => "tr",
            Self::HeaderCell => "th",
            Self::DataCell => "td",
            Self::Preformatted => "pre",
            Self::Rule => "hr",
            Self::Break => "br",
            Self::Strong => "strong",
            Self::Emphasis => "em",
            Self::Underline => "u",
            Self::Superscript => "sup",
            Self::Subscript => "sub",
            Self::Code => "code",
            Self::Anchor => "a",
            Self::Image => "img",
        }
    }

    /// Void elements have no content and no end tag.
    #[inline]
    pub fn is_void(self) -> bool {
        matches!(self, Self::Break | Self::Rule | Self::Image)
    }

    fn layout(self) -> Layout {
        match self {
            Self::Paragraph
            | Self::Heading(_)
            | Self::ListItem
            | Self::Term
            | Self::Description
            | Self::HeaderCell
            | Self::DataCell => Layout::Content,
            Self::UnorderedList
            | Self::OrderedList
            | Self::DefinitionList
            | Self::Table
            | Self::Row
            | Self::Preformatted
            | Self::Rule => Layout::Container,
            Self::Break
            | Self::Strong
            | Self::Emphasis
            | Self::Underline
            | Self::Superscript
            | Self::Subscript
            | Self::Code
            | Self::Anchor
            | Self::Image => Layout::Inline,
        }
    }
}

/// HTML fragment writer.
///
/// # Example
/// ```
/// use creole_html::render::{HtmlWriter, Tag};
///
/// let mut writer = HtmlWriter::new(true);
/// writer.open(Tag::Paragraph, &[]);
/// writer.text("Hello <World>");
/// writer.void(Tag::Break, &[]);
///
/// let html = writer.finish();
/// assert_eq!(html, "<p>Hello &lt;World&gt;<br></p>\n");
/// ```
#[derive(Debug)]
pub struct HtmlWriter {
    out: Vec<u8>,
    stack: SmallVec<[Tag; 16]>,
    /// Most recent start tag, cleared by text.
    last_tag: Option<Tag>,
    html5: bool,
}

impl HtmlWriter {
    /// Create a writer. `html5 == false` writes void elements as `<br/>`.
    pub fn new(html5: bool) -> Self {
        Self::with_capacity_for(0, html5)
    }

    /// Create with capacity sized for `input_len` bytes of markup.
    ///
    /// HTML is typically a bit larger than the markup it came from.
    pub fn with_capacity_for(input_len: usize, html5: bool) -> Self {
        Self {
            out: Vec::with_capacity(input_len + input_len / 4 + 64),
            stack: SmallVec::new(),
            last_tag: None,
            html5,
        }
    }

    /// Number of open tags.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Innermost open tag.
    #[inline]
    pub fn current(&self) -> Option<Tag> {
        self.stack.last().copied()
    }

    /// Write a start tag and push it on the stack.
    pub fn open(&mut self, tag: Tag, attrs: &[(&str, &str)]) {
        debug_assert!(!tag.is_void(), "void element {} opened", tag.name());
        self.start_tag(tag, attrs);
        self.stack.push(tag);
    }

    /// Write a void element.
    pub fn void(&mut self, tag: Tag, attrs: &[(&str, &str)]) {
        debug_assert!(tag.is_void(), "{} is not a void element", tag.name());
        self.start_tag(tag, attrs);
    }

    /// Write escaped text.
    pub fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let text = match self.last_tag {
            Some(tag) if tag.layout() == Layout::Content => text.trim_start(),
            _ => text,
        };
        self.last_tag = None;
        escape::escape_text_into(&mut self.out, text);
    }

    /// Write one escaped line of preformatted text and its line break.
    pub fn preformatted_line(&mut self, line: &str) {
        debug_assert_eq!(self.current(), Some(Tag::Preformatted));
        escape::escape_text_into(&mut self.out, line);
        self.out.push(b'\n');
    }

    /// Close the innermost open tag.
    pub fn close(&mut self) -> Option<Tag> {
        let tag = self.stack.pop()?;
        self.end_tag(tag);
        Some(tag)
    }

    /// Close tags until at most `depth` remain open.
    pub fn close_to(&mut self, depth: usize) {
        while self.stack.len() > depth {
            self.close();
        }
    }

    /// Close everything and return the fragment.
    pub fn finish(mut self) -> String {
        self.close_to(0);
        match String::from_utf8(self.out) {
            Ok(html) => html,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        }
    }

    /// Start a new line unless the output is empty or already on one.
    #[inline]
    fn newline(&mut self) {
        if self.out.last().is_some_and(|&b| b != b'\n') {
            self.out.push(b'\n');
        }
    }

    fn start_tag(&mut self, tag: Tag, attrs: &[(&str, &str)]) {
        let layout = tag.layout();
        if layout != Layout::Inline {
            self.newline();
        }

        self.out.push(b'<');
        self.out.extend_from_slice(tag.name().as_bytes());
        for (name, value) in attrs {
            self.out.push(b' ');
            self.out.extend_from_slice(name.as_bytes());
            self.out.extend_from_slice(b"=\"");
            escape::escape_attr_into(&mut self.out, value);
            self.out.push(b'"');
        }
        if tag.is_void() && !self.html5 {
            self.out.push(b'/');
        }
        self.out.push(b'>');

        if layout == Layout::Container {
            self.newline();
        }
        self.last_tag = Some(tag);
    }

    fn end_tag(&mut self, tag: Tag) {
        let layout = tag.layout();
        match layout {
            Layout::Content => {
                while self.out.last().is_some_and(u8::is_ascii_whitespace) {
                    self.out.pop();
                }
            }
            Layout::Container => self.newline(),
            Layout::Inline => {}
        }

        self.out.extend_from_slice(b"</");
        self.out.extend_from_slice(tag.name().as_bytes());
        self.out.push(b'>');

        if layout != Layout::Inline {
            self.newline();
        }
    }
}
