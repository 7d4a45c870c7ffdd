//! Table row splitting.
//!
//! A row is a run of cells, each introduced by `|` (data) or `|=`
//! (header). Consecutive delimiters with nothing between them merge into
//! one cell spanning that many columns; the last delimiter of the run
//! decides whether the cell is a header.

use crate::inline::{self, MissCache, cell_end};
use crate::limits;

use super::node::{Cell, Row};

/// Split a trimmed line starting with `|` into cells.
pub fn parse_row(line: &str) -> Row {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let mut cells = Vec::new();
    let mut misses = MissCache::default();
    let mut pos = 0;

    while pos < len {
        let mut colspan = 0u32;
        let mut header = false;
        while pos < len && bytes[pos] == b'|' {
            header = bytes.get(pos + 1) == Some(&b'=');
            pos += 1 + usize::from(header);
            colspan = colspan.saturating_add(1);
        }

        // Delimiters closing the row do not start a cell.
        if pos >= len {
            break;
        }

        let end = cell_end(line, pos, &mut misses);
        cells.push(Cell {
            header,
            colspan: colspan.clamp(1, limits::MAX_TABLE_COLSPAN),
            content: inline::parse(line[pos..end].trim()),
        });
        pos = end;
    }

    Row { cells }
}
