//! Block tree types.

use crate::inline::Inline;

/// A closed block.
///
/// Every block renders to balanced HTML on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// `== Title == id`
    Heading {
        /// 1 to 6.
        level: u8,
        content: Vec<Inline>,
        /// Trailing id text, if any.
        id: Option<String>,
    },
    Paragraph(Vec<Inline>),
    List(List),
    /// Terms and descriptions in source order.
    DefinitionList(Vec<Definition>),
    Table(Vec<Row>),
    /// `----`
    HorizontalRule,
    /// `{{{ ... }}}` lines, verbatim.
    Preformatted(Vec<String>),
}

/// An ordered or unordered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    /// Nesting depth, 1 for a top-level list.
    pub depth: usize,
    pub items: Vec<ListItem>,
}

/// One list item and the lists nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub content: Vec<Inline>,
    pub sublists: Vec<List>,
}

/// An entry in a definition list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    /// `; term`
    Term(Vec<Inline>),
    /// `: description`
    Description(Vec<Inline>),
}

/// A table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// `|=` cell.
    pub header: bool,
    /// Number of merged delimiters, at least 1.
    pub colspan: u32,
    pub content: Vec<Inline>,
}

/// The first heading of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Plain text of the heading, markup removed. Not HTML-escaped.
    pub text: String,
    /// Trailing id text.
    pub id: Option<String>,
}

/// A fully parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
    /// The first heading with non-empty text.
    pub heading: Option<Heading>,
    /// Bytes of markup read, one per line terminator included.
    pub source_len: usize,
}
