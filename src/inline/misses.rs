//! Memo of failed closer searches.
//!
//! A search over `[from, end)` that found no closer also answers every
//! later search for the same construct that starts inside the scanned
//! range and sees no more text. Every scanner steps over escapes, links,
//! images, nowiki and free links at the same positions, so a later search
//! follows the tail of the earlier one. That keeps runs of unclosed
//! openers linear.

use super::emphasis::SpanKind;

/// Constructs whose closer must appear on the line they open on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Atomic {
    Link,
    Image,
    Nowiki,
}

impl Atomic {
    const COUNT: usize = 3;
}

/// A failed search bounded to one line.
#[derive(Debug, Clone, Copy)]
struct LineMiss {
    from: usize,
    end: usize,
    /// Where the search stopped: the line end, or `end`.
    limit: usize,
}

/// Failed searches, one slot per span kind and per atomic construct.
#[derive(Debug, Default)]
pub(crate) struct MissCache {
    spans: [Option<(usize, usize)>; SpanKind::COUNT],
    atomics: [Option<LineMiss>; Atomic::COUNT],
}

impl MissCache {
    #[inline]
    pub(crate) fn covers_span(&self, kind: SpanKind, from: usize, end: usize) -> bool {
        matches!(self.spans[kind.index()], Some((f, e)) if from >= f && end <= e)
    }

    #[inline]
    pub(crate) fn record_span(&mut self, kind: SpanKind, from: usize, end: usize) {
        self.spans[kind.index()] = Some((from, end));
    }

    #[inline]
    pub(crate) fn covers_atomic(&self, atomic: Atomic, from: usize, end: usize) -> bool {
        let Some(miss) = self.atomics[atomic as usize] else {
            return false;
        };
        if from < miss.from || from > miss.limit {
            return false;
        }
        // A search stopped by a newline sees that same line for any bound
        // past it.
        let same_line = end == miss.end || (miss.limit < miss.end && end > miss.limit);
        // A shorter bound can turn `}}}}` into a valid nowiki closer, so
        // only links and images may shrink.
        same_line || (atomic != Atomic::Nowiki && end <= miss.end)
    }

    #[inline]
    pub(crate) fn record_atomic(&mut self, atomic: Atomic, from: usize, end: usize, limit: usize) {
        self.atomics[atomic as usize] = Some(LineMiss { from, end, limit });
    }
}
