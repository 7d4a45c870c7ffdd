//! Block-level parser for Creole.
//!
//! The block parser is line-oriented and handles:
//! - Headings with optional ids
//! - Paragraphs
//! - Ordered and unordered lists, nested by marker depth
//! - Definition lists
//! - Tables with header cells and merged columns
//! - Horizontal rules
//! - Preformatted blocks
//!
//! Text runs are handed to the inline parser as soon as their block
//! closes, so the resulting [`Document`] is complete.

mod node;
mod parser;
mod table;

pub use node::{Block, Cell, Definition, Document, Heading, List, ListItem, Row};
pub use parser::BlockParser;
pub use table::parse_row;

use crate::source::LineSource;

/// Parse every line of `source` into a document.
pub fn parse_document(source: impl LineSource) -> Document {
    let mut parser = BlockParser::new();
    source.for_each_line(|line| parser.feed_line(line));
    parser.finish()
}
