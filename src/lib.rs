//! creole-html: Creole 1.0 wiki markup to HTML fragments
//!
//! This crate converts Creole markup into an HTML5 (or XHTML) fragment
//! suitable for embedding in an existing page, and reports the first
//! heading of the document alongside it.
//!
//! # Design Principles
//! - Single pass over the lines; no backtracking across lines
//! - No regex: byte-level scanning
//! - Total: malformed markup degrades to literal text, never to an error
//! - Balanced output: every end tag comes off a tag stack
//!
//! # Supported markup
//! Creole 1.0 plus superscript (`^^`), subscript (`,,`), underline (`__`),
//! definition lists (`;` / `:`), heading ids (`== Title == id`) and merged
//! table columns (`||` / `|=|=`).

#[cfg(feature = "trace")]
macro_rules! trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}

#[cfg(not(feature = "trace"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

pub mod block;
pub mod cursor;
pub mod escape;
pub mod inline;
pub mod limits;
pub mod render;
pub mod source;

use std::fmt;

// Re-export primary types
pub use block::{Block, BlockParser, Document, Heading};
pub use inline::{Inline, InlineParser};
pub use render::{HtmlWriter, Tag};
pub use source::LineSource;

use block::{Definition, List};
use inline::links::is_absolute;

/// Rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Write void elements HTML5 style (`<br>`); `false` writes `<br/>`.
    pub html5: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { html5: true }
    }
}

impl Options {
    /// XHTML output.
    pub fn xhtml() -> Self {
        Self { html5: false }
    }
}

/// Rewrites relative link and image targets.
///
/// Targets of the form `<scheme>://...` are absolute and never passed to
/// the resolver; everything else (page names, interwiki links such as
/// `Wiki:Page`, relative paths) is. Any `Fn(&str) -> String` closure is a
/// resolver.
pub trait LinkResolver: Send + Sync {
    fn resolve(&self, uri: &str) -> String;
}

impl<F> LinkResolver for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn resolve(&self, uri: &str) -> String {
        self(uri)
    }
}

/// Creole parser.
///
/// Holds configuration only; every call to [`parse`](Self::parse) starts
/// from fresh state, so one parser can be shared across threads.
///
/// # Example
/// ```
/// use creole_html::Parser;
///
/// let parser = Parser::new().with_resolver(|page: &str| format!("/wiki/{page}"));
/// let result = parser.parse("= Home =\nSee [[About]].");
/// assert_eq!(
///     result.html(),
///     "<h1>Home</h1>\n<p>See <a href=\"/wiki/About\">About</a>.</p>\n"
/// );
/// assert_eq!(result.heading().map(|h| h.text.as_str()), Some("Home"));
/// ```
#[derive(Default)]
pub struct Parser {
    options: Options,
    resolver: Option<Box<dyn LinkResolver>>,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("options", &self.options)
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

impl Parser {
    /// Parser with default options and no resolver.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            resolver: None,
        }
    }

    /// Use `resolver` for relative link and image targets.
    pub fn with_resolver(mut self, resolver: impl LinkResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Parse markup into an HTML fragment and its first heading.
    pub fn parse(&self, source: impl LineSource) -> ParseResult {
        let document = self.parse_document(source);
        let html = self.render(&document);
        ParseResult {
            html,
            heading: document.heading,
        }
    }

    /// Parse markup into a block tree without rendering it.
    pub fn parse_document(&self, source: impl LineSource) -> Document {
        let document = block::parse_document(source);
        trace!(blocks = document.blocks.len(), "parsed document");
        document
    }

    /// Render a parsed document.
    pub fn render(&self, document: &Document) -> String {
        let mut renderer = Renderer {
            writer: HtmlWriter::with_capacity_for(document.source_len, self.options.html5),
            resolver: self.resolver.as_deref(),
        };
        for block in &document.blocks {
            renderer.block(block);
        }
        renderer.writer.finish()
    }
}

/// The outcome of a parse: the HTML fragment and the first heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    html: String,
    heading: Option<Heading>,
}

impl ParseResult {
    pub fn html(&self) -> &str {
        &self.html
    }

    /// The first heading with non-empty text, if any.
    pub fn heading(&self) -> Option<&Heading> {
        self.heading.as_ref()
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Convert Creole markup to an HTML5 fragment.
///
/// This is the primary API for simple use cases.
///
/// # Example
/// ```
/// let html = creole_html::to_html("== Hello\n\n**World**");
/// assert_eq!(html, "<h2>Hello</h2>\n<p><strong>World</strong></p>\n");
/// ```
pub fn to_html(input: &str) -> String {
    to_html_with_options(input, &Options::default())
}

/// Convert Creole markup to HTML with options.
pub fn to_html_with_options(input: &str, options: &Options) -> String {
    Parser::with_options(*options).parse(input).into_html()
}

/// Parse markup with default options.
pub fn parse(source: impl LineSource) -> ParseResult {
    Parser::new().parse(source)
}

/// Walks a document and drives the writer.
struct Renderer<'p> {
    writer: HtmlWriter,
    resolver: Option<&'p dyn LinkResolver>,
}

impl Renderer<'_> {
    fn resolve(&self, target: &str) -> String {
        match self.resolver {
            Some(resolver) if !is_absolute(target) => resolver.resolve(target),
            _ => target.to_owned(),
        }
    }

    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading { level, content, id } => {
                match id {
                    Some(id) => self.writer.open(Tag::Heading(*level), &[("id", id.as_str())]),
                    None => self.writer.open(Tag::Heading(*level), &[]),
                }
                self.inlines(content);
                self.writer.close();
            }
            Block::Paragraph(content) => {
                self.writer.open(Tag::Paragraph, &[]);
                self.inlines(content);
                self.writer.close();
            }
            Block::List(list) => self.list(list),
            Block::DefinitionList(definitions) => {
                self.writer.open(Tag::DefinitionList, &[]);
                for definition in definitions {
                    let (tag, content) = match definition {
                        Definition::Term(content) => (Tag::Term, content),
                        Definition::Description(content) => (Tag::Description, content),
                    };
                    self.writer.open(tag, &[]);
                    self.inlines(content);
                    self.writer.close();
                }
                self.writer.close();
            }
            Block::Table(rows) => {
                self.writer.open(Tag::Table, &[]);
                for row in rows {
                    self.writer.open(Tag::Row, &[]);
                    for cell in &row.cells {
                        let tag = if cell.header { Tag::HeaderCell } else { Tag::DataCell };
                        if cell.colspan > 1 {
                            let colspan = cell.colspan.to_string();
                            self.writer.open(tag, &[("colspan", colspan.as_str())]);
                        } else {
                            self.writer.open(tag, &[]);
                        }
                        self.inlines(&cell.content);
                        self.writer.close();
                    }
                    self.writer.close();
                }
                self.writer.close();
            }
            Block::HorizontalRule => self.writer.void(Tag::Rule, &[]),
            Block::Preformatted(lines) => {
                self.writer.open(Tag::Preformatted, &[]);
                for line in lines {
                    self.writer.preformatted_line(line);
                }
                self.writer.close();
            }
        }
    }

    fn list(&mut self, list: &List) {
        let tag = if list.ordered { Tag::OrderedList } else { Tag::UnorderedList };
        self.writer.open(tag, &[]);
        for item in &list.items {
            self.writer.open(Tag::ListItem, &[]);
            self.inlines(&item.content);
            for sublist in &item.sublists {
                self.list(sublist);
            }
            self.writer.close();
        }
        self.writer.close();
    }

    fn inlines(&mut self, inlines: &[Inline]) {
        for inline in inlines {
            self.inline(inline);
        }
    }

    fn span(&mut self, tag: Tag, children: &[Inline]) {
        self.writer.open(tag, &[]);
        self.inlines(children);
        self.writer.close();
    }

    fn inline(&mut self, inline: &Inline) {
        match inline {
            Inline::Text(text) => self.writer.text(text),
            Inline::Bold(children) => self.span(Tag::Strong, children),
            Inline::Italic(children) => self.span(Tag::Emphasis, children),
            Inline::Underline(children) => self.span(Tag::Underline, children),
            Inline::Superscript(children) => self.span(Tag::Superscript, children),
            Inline::Subscript(children) => self.span(Tag::Subscript, children),
            Inline::LineBreak => self.writer.void(Tag::Break, &[]),
            Inline::Link { target, label } => {
                let href = self.resolve(target);
                self.writer.open(Tag::Anchor, &[("href", href.as_str())]);
                match label {
                    Some(label) => self.inlines(label),
                    None => self.writer.text(target),
                }
                self.writer.close();
            }
            Inline::Image { target, alt } => {
                let src = self.resolve(target);
                match alt {
                    Some(alt) => self.writer.void(Tag::Image, &[("src", src.as_str()), ("alt", alt.as_str())]),
                    None => self.writer.void(Tag::Image, &[("src", src.as_str())]),
                }
            }
            Inline::Code(code) => {
                self.writer.open(Tag::Code, &[]);
                self.writer.text(code);
                self.writer.close();
            }
        }
    }
}
