//! Block parser implementation.

use smallvec::SmallVec;

use crate::cursor::Cursor;
use crate::inline::{self, escape_end, plain_text};
use crate::limits;

use super::node::{Block, Definition, Document, Heading, List, ListItem, Row};
use super::table::parse_row;

/// A list item whose text is still accumulating.
#[derive(Debug, Default)]
struct PendingItem {
    text: String,
    /// Lists already closed beneath this item.
    sublists: Vec<List>,
}

/// A list at one nesting level.
#[derive(Debug)]
struct OpenList {
    ordered: bool,
    items: Vec<ListItem>,
    current: Option<PendingItem>,
}

impl OpenList {
    fn new(ordered: bool) -> Self {
        Self {
            ordered,
            items: Vec::new(),
            current: None,
        }
    }

    fn finish_item(&mut self) {
        if let Some(item) = self.current.take() {
            self.items.push(ListItem {
                content: inline::parse(&item.text),
                sublists: item.sublists,
            });
        }
    }
}

/// Stack of open lists, outermost first.
#[derive(Debug, Default)]
struct ListStack {
    lists: SmallVec<[OpenList; 8]>,
    /// Closed top-level lists.
    done: Vec<List>,
}

impl ListStack {
    fn depth(&self) -> usize {
        self.lists.len()
    }

    /// Start an item at `level`, which is at most one deeper than the
    /// current depth.
    fn item(&mut self, level: usize, ordered: bool, text: &str) {
        debug_assert!(level >= 1 && level <= self.depth() + 1);

        while self.depth() > level {
            self.pop();
        }

        if self.depth() == level {
            match self.lists.last_mut() {
                Some(list) if list.ordered == ordered => list.finish_item(),
                _ => {
                    trace!(level, ordered, "list kind switch");
                    self.pop();
                    self.lists.push(OpenList::new(ordered));
                }
            }
        } else {
            trace!(level, ordered, "open nested list");
            self.lists.push(OpenList::new(ordered));
        }

        if let Some(list) = self.lists.last_mut() {
            list.current = Some(PendingItem {
                text: text.to_owned(),
                sublists: Vec::new(),
            });
        }
    }

    /// Append a continuation line to the innermost open item.
    fn continue_item(&mut self, line: &str) {
        if let Some(item) = self.lists.last_mut().and_then(|l| l.current.as_mut()) {
            item.text.push('\n');
            item.text.push_str(line);
        }
    }

    /// Close the innermost list, attaching it to its parent item.
    fn pop(&mut self) {
        let Some(mut open) = self.lists.pop() else {
            return;
        };
        open.finish_item();
        let list = List {
            ordered: open.ordered,
            depth: self.depth() + 1,
            items: open.items,
        };
        match self.lists.last_mut().and_then(|l| l.current.as_mut()) {
            Some(parent) => parent.sublists.push(list),
            None => self.done.push(list),
        }
    }

    fn finish(mut self) -> Vec<List> {
        while self.depth() > 0 {
            self.pop();
        }
        self.done
    }
}

/// A definition list entry whose text is still accumulating.
#[derive(Debug)]
struct PendingDefinition {
    term: bool,
    text: String,
}

/// The block currently accepting lines.
#[derive(Debug, Default)]
enum OpenBlock {
    #[default]
    Idle,
    Paragraph(String),
    List(ListStack),
    Definitions(Vec<PendingDefinition>),
    Table(Vec<Row>),
    Preformatted(Vec<String>),
}

/// Line-at-a-time block parser.
///
/// Feed lines with [`feed_line`](Self::feed_line), then call
/// [`finish`](Self::finish) to close whatever is still open.
///
/// # Example
/// ```
/// use creole_html::block::{Block, BlockParser};
///
/// let mut parser = BlockParser::new();
/// parser.feed_line("----");
/// assert_eq!(parser.finish().blocks, vec![Block::HorizontalRule]);
/// ```
#[derive(Debug, Default)]
pub struct BlockParser {
    blocks: Vec<Block>,
    open: OpenBlock,
    heading: Option<Heading>,
    source_len: usize,
}

impl BlockParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one line, without its terminator.
    pub fn feed_line(&mut self, line: &str) {
        self.source_len += line.len() + 1;
        let line = line.trim_end();

        if let OpenBlock::Preformatted(lines) = &mut self.open {
            if line == "}}}" {
                self.close();
            } else if line.trim_start() == "}}}" {
                // An indented closer is kept, minus one character.
                let mut chars = line.chars();
                chars.next();
                lines.push(chars.as_str().to_owned());
            } else {
                lines.push(line.to_owned());
            }
            return;
        }

        let line = line.trim_start();
        match line.as_bytes().first() {
            None => self.close(),
            Some(b'{') if line == "{{{" => {
                self.close();
                trace!("open preformatted");
                self.open = OpenBlock::Preformatted(Vec::new());
            }
            Some(b'-') if line.len() >= 4 && line.bytes().all(|b| b == b'-') => {
                self.close();
                self.blocks.push(Block::HorizontalRule);
            }
            Some(b'=') => {
                self.close();
                self.heading(line);
            }
            Some(b'*' | b'#') => self.list_item(line),
            Some(b';') => self.term(line),
            Some(b':') => self.description(line),
            Some(b'|') => self.table_row(line),
            Some(_) => self.content(line),
        }
    }

    /// Close all open blocks and return the document.
    pub fn finish(mut self) -> Document {
        self.close();
        Document {
            blocks: self.blocks,
            heading: self.heading,
            source_len: self.source_len,
        }
    }

    fn heading(&mut self, line: &str) {
        let mut cur = Cursor::new(line);
        let level = cur.skip_byte(b'=').min(usize::from(limits::MAX_HEADING_LEVEL)) as u8;

        let start = cur.offset();
        while let Some(b) = cur.peek() {
            let pos = cur.offset();
            if let Some(next) = escape_end(line, pos, line.len()) {
                cur.advance(next - pos);
            } else if b == b'=' {
                break;
            } else {
                cur.advance(1);
            }
        }
        let raw = cur.slice_from(start).trim();

        cur.skip_byte(b'=');
        let id = cur.rest().trim();
        let id = (!id.is_empty()).then(|| id.to_owned());

        let content = inline::parse(raw);
        if self.heading.is_none() {
            let text = plain_text(&content);
            if !text.is_empty() {
                self.heading = Some(Heading {
                    text,
                    id: id.clone(),
                });
            }
        }

        trace!(level, "heading");
        self.blocks.push(Block::Heading { level, content, id });
    }

    fn list_item(&mut self, line: &str) {
        let run = line.bytes().take_while(|&b| b == b'*' || b == b'#').count();
        let ordered = line.as_bytes()[run - 1] == b'#';
        let depth = match &self.open {
            OpenBlock::List(stack) => stack.depth(),
            _ => 0,
        };

        // Skipping a level is not a list item; this is also what lets a
        // line start with bold text.
        if run > depth + 1 || run > limits::MAX_LIST_NESTING {
            self.content(line);
            return;
        }

        if depth == 0 {
            self.close();
            trace!(ordered, "open list");
            self.open = OpenBlock::List(ListStack::default());
        }
        if let OpenBlock::List(stack) = &mut self.open {
            stack.item(run, ordered, line[run..].trim_start());
        }
    }

    fn term(&mut self, line: &str) {
        let entry = PendingDefinition {
            term: true,
            text: line[1..].trim_start().to_owned(),
        };
        match &mut self.open {
            OpenBlock::Definitions(entries) => entries.push(entry),
            _ => {
                self.close();
                trace!("open definition list");
                self.open = OpenBlock::Definitions(vec![entry]);
            }
        }
    }

    fn description(&mut self, line: &str) {
        match &mut self.open {
            OpenBlock::Definitions(entries) => entries.push(PendingDefinition {
                term: false,
                text: line[1..].trim_start().to_owned(),
            }),
            _ => self.content(line),
        }
    }

    fn table_row(&mut self, line: &str) {
        let row = parse_row(line);
        match &mut self.open {
            OpenBlock::Table(rows) => rows.push(row),
            _ => {
                self.close();
                trace!("open table");
                self.open = OpenBlock::Table(vec![row]);
            }
        }
    }

    /// A line of running text: continues the open paragraph, list item or
    /// definition entry, or starts a paragraph.
    fn content(&mut self, line: &str) {
        let continued = match &mut self.open {
            OpenBlock::Paragraph(text) => Some(text),
            OpenBlock::Definitions(entries) => entries.last_mut().map(|e| &mut e.text),
            OpenBlock::List(stack) => {
                stack.continue_item(line);
                return;
            }
            _ => None,
        };

        match continued {
            Some(text) => {
                text.push('\n');
                text.push_str(line);
            }
            None => {
                self.close();
                trace!("open paragraph");
                self.open = OpenBlock::Paragraph(line.to_owned());
            }
        }
    }

    /// Close the open block, if any.
    fn close(&mut self) {
        match std::mem::take(&mut self.open) {
            OpenBlock::Idle => {}
            OpenBlock::Paragraph(text) => {
                self.blocks.push(Block::Paragraph(inline::parse(&text)));
            }
            OpenBlock::List(stack) => {
                self.blocks.extend(stack.finish().into_iter().map(Block::List));
            }
            OpenBlock::Definitions(entries) => {
                let definitions = entries
                    .into_iter()
                    .map(|entry| {
                        let content = inline::parse(&entry.text);
                        if entry.term {
                            Definition::Term(content)
                        } else {
                            Definition::Description(content)
                        }
                    })
                    .collect();
                self.blocks.push(Block::DefinitionList(definitions));
            }
            OpenBlock::Table(rows) => self.blocks.push(Block::Table(rows)),
            OpenBlock::Preformatted(lines) => self.blocks.push(Block::Preformatted(lines)),
        }
    }
}
